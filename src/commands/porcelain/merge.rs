use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::conflict::conflict_block;
use crate::artifacts::merge::resolver::{MergeAction, MergePlan};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::io::Write;
use tracing::{debug, info};

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch was already part of the current history
    AncestorOfCurrent,
    /// The active branch moved forward to the other head
    FastForwarded,
    /// A merge commit was recorded
    Merged(ObjectId),
    /// The listed files hold conflict blocks awaiting manual resolution
    Conflicted(Vec<String>),
}

impl Repository {
    pub async fn merge(&mut self, other: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let not_found = || RepositoryError::BranchNotFound(other.to_string());
        let other_branch = BranchName::try_parse(other.to_string()).map_err(|_| not_found())?;
        if !self.refs().branch_exists(&other_branch) {
            return Err(not_found().into());
        }
        let current_branch = self.refs().current_branch()?;
        if current_branch == other_branch {
            return Err(RepositoryError::CannotMergeSelf.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;
        if !index.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let mut history = self.load_history()?;
        let current_oid = self.refs().read_head()?;
        let other_oid = self.refs().resolve_branch(&other_branch)?;
        let split_oid = history.split_point(&current_oid, &other_oid)?;
        debug!(
            current = %current_oid.to_short_oid(),
            other = %other_oid.to_short_oid(),
            split = %split_oid.to_short_oid(),
            "found split point"
        );

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AncestorOfCurrent);
        }

        let current = history.commit(&current_oid)?.clone();
        let other_commit = history.commit(&other_oid)?.clone();

        if split_oid == current_oid {
            Migration::plan(
                self.workspace(),
                self.database(),
                current.manifest(),
                other_commit.manifest(),
            )?
            .apply()?;
            self.refs().update_head(&other_oid)?;

            info!(branch = %current_branch, commit = %other_oid.to_short_oid(), "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded);
        }

        let split = history.commit(&split_oid)?;
        let plan = MergePlan::build(split.manifest(), current.manifest(), other_commit.manifest());

        let contents = self.merged_contents(&plan)?;
        self.check_untracked_in_the_way(&current, &plan, &contents)?;
        self.apply_merge_plan(&mut index, &plan, contents)?;

        if plan.has_conflicts() {
            // markers stay in place so the resolution commit still drops those files
            index.write_updates()?;

            let conflicts = plan.conflicts().map(str::to_string).collect::<Vec<_>>();
            debug!(files = ?conflicts, "merge left conflicts");
            writeln!(self.writer(), "Encountered a merge conflict.")?;
            return Ok(MergeOutcome::Conflicted(conflicts));
        }

        let message = format!("Merged {current_branch} with {other_branch}.");
        let merge_oid = match self.write_commit(&mut history, &mut index, message).await {
            Ok(merge_oid) => merge_oid,
            Err(err) => {
                // the merged files are already in the workspace; keep them staged
                index.write_updates()?;
                return Err(err);
            }
        };

        Ok(MergeOutcome::Merged(merge_oid))
    }

    /// Content each action writes, in plan order; removals write nothing
    fn merged_contents(&self, plan: &MergePlan) -> anyhow::Result<Vec<Option<Bytes>>> {
        plan.actions()
            .iter()
            .map(|action| match action {
                MergeAction::Checkout { oid, .. } => self.database().get(oid).map(Some),
                MergeAction::Remove { .. } => Ok(None),
                MergeAction::Conflict { current, other, .. } => {
                    let current = self.blob_or_empty(current.as_ref())?;
                    let other = self.blob_or_empty(other.as_ref())?;
                    Ok(Some(conflict_block(&current, &other)))
                }
            })
            .collect()
    }

    fn blob_or_empty(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => self.database().get(oid),
            None => Ok(Bytes::new()),
        }
    }

    /// Refuse to overwrite a file the current commit does not track with different content
    fn check_untracked_in_the_way(
        &self,
        current: &Commit,
        plan: &MergePlan,
        contents: &[Option<Bytes>],
    ) -> anyhow::Result<()> {
        let mut in_the_way = Vec::new();

        for (action, content) in plan.actions().iter().zip(contents) {
            let name = action.name();
            let Some(content) = content else {
                continue;
            };
            if current.tracks(name) || !self.workspace().exists(name) {
                continue;
            }

            if &self.workspace().read_file(name)? != content {
                in_the_way.push(name.to_string());
            }
        }

        if in_the_way.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::UntrackedFileInTheWay(in_the_way).into())
        }
    }

    fn apply_merge_plan(
        &self,
        index: &mut Index,
        plan: &MergePlan,
        contents: Vec<Option<Bytes>>,
    ) -> anyhow::Result<()> {
        for (action, content) in plan.actions().iter().zip(contents) {
            match (action, content) {
                (MergeAction::Checkout { name, oid }, Some(content)) => {
                    self.workspace().write_file(name, &content)?;
                    index.stage(name.clone(), oid.clone());
                }
                (MergeAction::Remove { name }, _) => {
                    self.workspace().delete_file(name)?;
                    index.mark_removed(name.clone());
                }
                (MergeAction::Conflict { name, .. }, Some(content)) => {
                    self.workspace().write_file(name, &content)?;
                }
                (action, None) => {
                    anyhow::bail!("no merged content for {}", action.name());
                }
            }
        }

        Ok(())
    }
}
