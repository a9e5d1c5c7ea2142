use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;
        let status = StatusInfo::inspect(
            head.manifest(),
            &index,
            self.workspace(),
            self.refs().list_branches()?,
            self.refs().current_branch()?,
        )?;

        let mut writer = self.writer();
        status.render(writer.as_mut())?;

        Ok(())
    }
}
