//! Whole-tree restore
//!
//! Moving the working directory from the snapshot of one commit to another:
//!
//! 1. Plan: files tracked by the current commit but absent from the target are
//!    deleted, every file of the target is written.
//! 2. Check: a file the current commit does not track must not be overwritten
//!    with different content (nor have a directory or file put in its way).
//! 3. Apply: deletions first, then writes.
//!
//! All checks run before anything touches the disk, so an aborted restore
//! leaves the working directory as it was.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::BTreeSet;
use tracing::debug;

pub struct Migration<'r> {
    workspace: &'r Workspace,
    database: &'r Database,
    /// Files to delete
    deletions: BTreeSet<String>,
    /// Files to (re)write with the blob they should contain
    writes: Vec<(String, ObjectId)>,
}

impl<'r> Migration<'r> {
    /// Plan the move from `current` to `target`, refusing to clobber untracked files
    pub fn plan(
        workspace: &'r Workspace,
        database: &'r Database,
        current: &Manifest,
        target: &Manifest,
    ) -> anyhow::Result<Self> {
        let deletions = current
            .keys()
            .filter(|name| !target.contains_key(*name))
            .cloned()
            .collect::<BTreeSet<_>>();

        let mut in_the_way = Vec::new();
        for (name, oid) in target {
            if Self::blocks_write(workspace, current, &deletions, name, oid)? {
                in_the_way.push(name.clone());
            }
        }

        if !in_the_way.is_empty() {
            debug!(files = ?in_the_way, "untracked files block the restore");
            return Err(RepositoryError::UntrackedFileInTheWay(in_the_way).into());
        }

        let writes = target
            .iter()
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect();

        Ok(Self {
            workspace,
            database,
            deletions,
            writes,
        })
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }

    pub fn writes(&self) -> &[(String, ObjectId)] {
        &self.writes
    }

    pub fn apply(&self) -> anyhow::Result<()> {
        for name in &self.deletions {
            self.workspace.delete_file(name)?;
        }

        for (name, oid) in &self.writes {
            let content = self.database.get(oid)?;
            self.workspace.write_file(name, &content)?;
        }

        debug!(
            deleted = self.deletions.len(),
            written = self.writes.len(),
            "restored working directory"
        );

        Ok(())
    }

    /// Whether writing `oid` at `name` would destroy something the current commit does not track
    fn blocks_write(
        workspace: &Workspace,
        current: &Manifest,
        deletions: &BTreeSet<String>,
        name: &str,
        oid: &ObjectId,
    ) -> anyhow::Result<bool> {
        // a directory where the target has a file; only files the restore
        // would not delete anyway are in the way
        if workspace.is_dir(name) {
            let survivors = workspace
                .list_files_under(Some(name))?
                .into_iter()
                .any(|file| !deletions.contains(&file));
            return Ok(survivors);
        }

        // an untracked file where the target needs a directory
        let mut parent = name;
        while let Some((dir, _)) = parent.rsplit_once('/') {
            if workspace.exists(dir) && !deletions.contains(dir) {
                return Ok(true);
            }
            parent = dir;
        }

        if current.contains_key(name) || !workspace.exists(name) {
            return Ok(false);
        }

        Ok(&workspace.blob_id(name)? != oid)
    }
}
