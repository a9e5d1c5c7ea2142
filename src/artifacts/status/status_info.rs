use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Snapshot of the repository state reported by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub branches: Vec<BranchName>,
    pub current_branch: BranchName,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

impl StatusInfo {
    /// Compare the workspace with the current commit (`head`) and the staging index
    ///
    /// A file is reported as modified but not staged when
    /// - it is tracked, differs from the commit and is not staged, or
    /// - it is staged with content other than what is on disk.
    ///
    /// It is reported as deleted when it is staged but gone from disk, or tracked,
    /// gone from disk and not marked for removal. Untracked files are on disk but
    /// neither staged nor tracked, or marked for removal yet present again.
    pub fn inspect(
        head: &Manifest,
        index: &Index,
        workspace: &Workspace,
        branches: Vec<BranchName>,
        current_branch: BranchName,
    ) -> anyhow::Result<Self> {
        let workspace_files = workspace.list_files()?.into_iter().collect::<FileSet>();
        let mut workspace_changeset = ChangeSet::new();

        for (name, staged_oid) in index.staged() {
            if !workspace_files.contains(name) {
                workspace_changeset.insert(name.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.blob_id(name)? != staged_oid {
                workspace_changeset.insert(name.clone(), WorkspaceChangeType::Modified);
            }
        }

        for (name, tracked_oid) in head {
            if index.is_staged(name) || index.is_removed(name) {
                continue;
            }

            if !workspace_files.contains(name) {
                workspace_changeset.insert(name.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.blob_id(name)? != tracked_oid {
                workspace_changeset.insert(name.clone(), WorkspaceChangeType::Modified);
            }
        }

        let untracked_files = workspace_files
            .into_iter()
            .filter(|name| {
                index.is_removed(name) || !(index.is_staged(name) || head.contains_key(name))
            })
            .collect();

        Ok(Self {
            branches,
            current_branch,
            staged_files: index.staged().keys().cloned().collect(),
            removed_files: index.removed().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for name in &self.staged_files {
            writeln!(writer, "{}", name.green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for name in &self.removed_files {
            writeln!(writer, "{}", name.red())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (name, change) in &self.workspace_changeset {
            writeln!(writer, "{}", change.format_entry(name))?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for name in &self.untracked_files {
            writeln!(writer, "{}", name.red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
