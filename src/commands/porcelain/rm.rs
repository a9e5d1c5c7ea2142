use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use tracing::debug;

impl Repository {
    /// Unstage files, and mark the tracked ones for removal
    ///
    /// Tracked files are also deleted from the working directory. Every name is
    /// checked before anything changes.
    pub async fn rm(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;
        let head = self.head_commit()?;

        let names = paths
            .iter()
            .map(|path| {
                self.workspace()
                    .normalize(path)
                    .filter(|name| index.is_staged(name) || head.tracks(name))
                    .ok_or_else(|| {
                        anyhow::Error::from(RepositoryError::NoOpRemoval(path.to_string()))
                    })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        for name in names {
            index.unstage(&name);

            if head.tracks(&name) {
                self.workspace().delete_file(&name)?;
                debug!(file = %name, "marked for removal");
                index.mark_removed(name);
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
