use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use tracing::info;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::RepositoryAlreadyExists(self.path().to_path_buf()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.staging().objects_path())
            .context("Failed to create .twig/staging directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let root = Commit::initial(self.config().now());
        let root_oid = root.object_id()?;

        self.database().store(&root)?;
        self.journal().append(&root_oid)?;

        let master = BranchName::default_branch();
        self.refs()
            .create_branch(&master, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&master)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.write_updates()?;

        info!(root = %root_oid.to_short_oid(), "initialized repository");

        Ok(())
    }
}
