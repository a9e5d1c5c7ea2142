use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::collections::HashMap;

/// Every commit of the repository, by ID and in creation order
///
/// Commits are never mutated or removed once inserted.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    commits: HashMap<ObjectId, Commit>,
    order: Vec<ObjectId>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit, refusing IDs that are already taken
    pub fn insert(&mut self, oid: ObjectId, commit: Commit) -> anyhow::Result<()> {
        if self.commits.contains_key(&oid) {
            return Err(RepositoryError::CommitIdCollision(oid.to_string()).into());
        }

        self.order.push(oid.clone());
        self.commits.insert(oid, commit);

        Ok(())
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    /// Look up a commit that must exist
    pub fn commit(&self, oid: &ObjectId) -> anyhow::Result<&Commit> {
        self.commits
            .get(oid)
            .with_context(|| format!("commit {oid} is missing from the history"))
    }

    pub fn parent_of(&self, oid: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.commit(oid)?.parent().cloned())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All commits, oldest first
    pub fn chronological(&self) -> impl Iterator<Item = (&ObjectId, &Commit)> {
        self.order
            .iter()
            .filter_map(|oid| self.commits.get(oid).map(|commit| (oid, commit)))
    }

    /// The commits from `head` back to the root, newest first
    pub fn ancestry(&self, head: &ObjectId) -> anyhow::Result<Vec<(&ObjectId, &Commit)>> {
        let mut ancestry = Vec::new();
        let mut current = Some(head);

        while let Some(oid) = current {
            let (oid, commit) = self
                .commits
                .get_key_value(oid)
                .with_context(|| format!("commit {oid} is missing from the history"))?;
            ancestry.push((oid, commit));
            current = commit.parent();
        }

        Ok(ancestry)
    }

    /// IDs of every commit carrying exactly `message`, oldest first
    pub fn find_by_message(&self, message: &str) -> Vec<&ObjectId> {
        self.chronological()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect()
    }

    /// Nearest common ancestor of two commits
    pub fn split_point(&self, source: &ObjectId, target: &ObjectId) -> anyhow::Result<ObjectId> {
        let finder = SplitPointFinder::new(|oid| self.parent_of(oid));

        finder.find_split_point(source, target)?.with_context(|| {
            format!("commits {source} and {target} share no history")
        })
    }
}
