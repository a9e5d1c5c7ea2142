use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use tracing::info;

impl Repository {
    /// Restore every file of a commit and move the active branch to it
    pub async fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let history = self.load_history()?;
        let target_oid = self.resolve_commit(&history, commit)?;
        let target = history.commit(&target_oid)?;
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

        self.refs().update_head(&target_oid)?;
        self.clear_staging(&mut index)?;

        info!(commit = %target_oid.to_short_oid(), "reset active branch");

        Ok(())
    }
}
