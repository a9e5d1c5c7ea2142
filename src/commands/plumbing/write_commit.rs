use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::history::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::{Commit, Manifest};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::info;

impl Repository {
    /// Commit the staging index on top of the active branch head
    ///
    /// The new manifest is the parent's, minus the files marked for removal,
    /// overridden by the staged entries. Staged blobs are promoted to the
    /// permanent store and the staging index is emptied afterwards.
    pub async fn write_commit(
        &self,
        history: &mut CommitGraph,
        index: &mut Index,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let parent_oid = self.refs().read_head()?;
        let parent = history.commit(&parent_oid)?;

        let mut manifest: Manifest = parent
            .manifest()
            .iter()
            .filter(|(name, _)| !index.is_removed(name))
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect();
        for (name, oid) in index.staged() {
            manifest.insert(name.clone(), oid.clone());
        }

        let commit = Commit::new(message, self.config().now(), Some(parent_oid), manifest);
        let commit_oid = commit.object_id()?;

        // refuse before anything is written
        history.insert(commit_oid.clone(), commit.clone())?;

        for oid in index.staged().values() {
            self.database().import_from(self.staging(), oid)?;
        }
        self.database().store(&commit)?;
        self.journal().append(&commit_oid)?;
        self.refs().update_head(&commit_oid)?;

        self.clear_staging(index)?;
        info!(commit = %commit_oid.to_short_oid(), "committed");

        Ok(commit_oid)
    }
}
