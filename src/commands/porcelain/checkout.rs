use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::checkout::target::CheckoutTarget;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use tracing::info;

impl Repository {
    pub async fn checkout(&mut self, target: CheckoutTarget) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match target {
            CheckoutTarget::File { name } => {
                let head = self.head_commit()?;
                self.restore_file(&head, &name)
            }
            CheckoutTarget::CommitFile { commit, name } => {
                let history = self.load_history()?;
                let commit_oid = self.resolve_commit(&history, &commit)?;
                let commit = history.commit(&commit_oid)?;
                self.restore_file(commit, &name)
            }
            CheckoutTarget::Branch { name } => self.checkout_branch(&name).await,
        }
    }

    /// Overwrite one working file with its version in `commit`; nothing is staged
    fn restore_file(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let not_in_commit = || RepositoryError::FileNotInCommit(path.to_string());

        let name = self.workspace().normalize(path).ok_or_else(not_in_commit)?;
        let blob_oid = commit.blob_for(&name).ok_or_else(not_in_commit)?;

        let content = self.database().get(blob_oid)?;
        self.workspace().write_file(&name, &content)?;

        Ok(())
    }

    async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let not_found = || RepositoryError::BranchNotFound(name.to_string());

        let branch_name = BranchName::try_parse(name.to_string()).map_err(|_| not_found())?;
        if !self.refs().branch_exists(&branch_name) {
            return Err(not_found().into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let target_oid = self.refs().resolve_branch(&branch_name)?;
        let target = self
            .database()
            .parse_object_as_commit(&target_oid)?
            .ok_or_else(|| anyhow::anyhow!("branch {branch_name} does not point at a commit"))?;
        let current = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        Migration::plan(
            self.workspace(),
            self.database(),
            current.manifest(),
            target.manifest(),
        )?
        .apply()?;

        self.clear_staging(&mut index)?;
        self.refs().set_current_branch(&branch_name)?;

        info!(branch = %branch_name, "switched branch");

        Ok(())
    }
}
