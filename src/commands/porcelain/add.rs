use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use tracing::debug;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        // Expand directories and read every file before staging anything
        let mut blobs = Vec::new();
        for path in paths {
            for name in self.expand_path(path)? {
                let blob = self.workspace().parse_blob(&name)?;
                blobs.push((name, blob));
            }
        }

        let head = self.head_commit()?;

        for (name, blob) in blobs {
            let blob_id = blob.object_id()?;
            index.unmark_removed(&name);

            if head.blob_for(&name) == Some(&blob_id) {
                // back to the committed version, nothing left to stage
                if index.unstage(&name).is_some() {
                    debug!(file = %name, "dropped stale staging entry");
                }
                continue;
            }

            self.stage_blob(&mut index, name, &blob)?;
        }

        if index.has_changed() {
            index.write_updates()?;
        }

        Ok(())
    }

    fn stage_blob(
        &self,
        index: &mut Index,
        name: String,
        blob: &Blob,
    ) -> anyhow::Result<()> {
        let blob_id = self.staging().store(blob)?;
        debug!(file = %name, blob = %blob_id.to_short_oid(), "staged");
        index.stage(name, blob_id);

        Ok(())
    }

    /// File names an `add` argument stands for
    ///
    /// Directories (the root included) expand to every file below them.
    fn expand_path(&self, path: &str) -> anyhow::Result<Vec<String>> {
        let not_found = || RepositoryError::FileNotFound(path.to_string());
        let name = self.workspace().normalize(path).ok_or_else(not_found)?;

        if name.is_empty() || self.workspace().is_dir(&name) {
            let dir_name = (!name.is_empty()).then_some(name.as_str());
            return self.workspace().list_files_under(dir_name);
        }

        if !self.workspace().exists(&name) {
            return Err(not_found().into());
        }

        Ok(vec![name])
    }
}
