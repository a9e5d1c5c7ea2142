use crate::areas::repository::Repository;
use crate::errors::RepositoryError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(RepositoryError::EmptyChangeSet.into());
        }

        let mut history = self.load_history()?;
        self.write_commit(&mut history, &mut index, message.to_string())
            .await?;

        Ok(())
    }
}
