use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// History of the active branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let history = self.load_history()?;
        let head_oid = self.refs().read_head()?;

        for (commit_oid, commit) in history.ancestry(&head_oid)? {
            self.show_commit(commit_oid, commit)?;
        }

        Ok(())
    }

    /// Every commit ever made, in creation order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let history = self.load_history()?;
        for (commit_oid, commit) in history.chronological() {
            self.show_commit(commit_oid, commit)?;
        }

        Ok(())
    }

    /// IDs of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let history = self.load_history()?;
        let matches = history.find_by_message(message);
        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit_oid in matches {
            writeln!(self.writer(), "{commit_oid}")?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {commit_oid}")?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
