use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch pointing at the current commit, without switching to it
    pub async fn create_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch; the commits it pointed at stay in the history
    pub async fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::CannotRemoveActiveBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
