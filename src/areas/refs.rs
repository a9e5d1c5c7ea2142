//! Branch table
//!
//! Branches are named pointers to commits, stored one file per branch under
//! `.twig/refs/heads/<name>` and holding the 40-character commit ID.
//! `HEAD` names the active branch as a symbolic reference:
//!
//! ```text
//! ref: refs/heads/master
//! ```
//!
//! The commit the active branch points to is the current commit.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Branch table manager
///
/// Reads and writes branch pointers and `HEAD`. Every write holds an exclusive
/// advisory lock on the ref file.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.twig`)
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

impl Refs {
    /// Name of the active branch, as recorded in `HEAD`
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("HEAD is not a symbolic reference: '{content}'"))?;

        BranchName::try_parse_ref_path(&symref_match[1])
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        info!(branch = %branch_name, "switching active branch");
        self.update_ref_file(
            self.head_path(),
            format!("ref: {}", branch_name.to_ref_path()),
        )
    }

    /// Commit the active branch points to
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;
        self.read_branch(&branch_name)?
            .with_context(|| format!("active branch {branch_name} has no commit"))
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    /// Branch head, failing with `BranchNotFound` if the branch does not exist
    pub fn resolve_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        self.read_branch(branch_name)?
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()).into())
    }

    /// Repoint a branch (creating its file if needed)
    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        info!(branch = %branch_name, commit = %oid.to_short_oid(), "repointing branch");
        self.update_ref_file(self.branch_path(branch_name), oid.to_string())
    }

    /// Repoint the active branch
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        // check whether another branch with the same name already exists
        if self.branch_exists(name) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()).into());
        }

        self.update_branch(name, source_oid)
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        let oid = self.read_branch(name)?;
        match oid {
            Some(oid) => {
                std::fs::remove_file(&branch_path).with_context(|| {
                    format!("failed to delete branch file at {:?}", branch_path)
                })?;
                self.prune_branch_empty_parent_dirs(&branch_path)?;
                info!(branch = %name, "deleted branch");

                Ok(oid)
            }
            None => Err(RepositoryError::BranchNotFound(name.to_string()).into()),
        }
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        // open the ref file as WRONLY and CREAT to write the new value to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path()
            .join(branch_name.as_ref())
            .into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
