//! Working directory access
//!
//! Files are addressed by their name relative to the repository root, always
//! written with `/` separators (e.g. `src/lib.rs`). The `.twig` directory is
//! never listed.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [".twig"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into a file name relative to the root
    ///
    /// The path is resolved lexically so that names of already deleted files
    /// can still be given. Paths leading outside the workspace (or into `.twig`)
    /// yield `None`; the root itself is the empty name.
    pub fn normalize(&self, user_path: &str) -> Option<String> {
        let joined = self.path.join(user_path);
        let mut resolved = PathBuf::new();

        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !resolved.pop() {
                        return None;
                    }
                }
                other => resolved.push(other.as_os_str()),
            }
        }

        let relative = resolved.strip_prefix(&self.path).ok()?;
        let name = Self::path_to_name(relative);

        (!Self::is_ignored(relative)).then_some(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn is_dir(&self, name: &str) -> bool {
        self.path.join(name).is_dir()
    }

    /// Every file in the workspace, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.list_files_under(None)
    }

    /// Every file below `dir_name` (or the whole workspace), sorted by name
    pub fn list_files_under(&self, dir_name: Option<&str>) -> anyhow::Result<Vec<String>> {
        let root_path = match dir_name {
            Some(dir_name) => self.path.join(dir_name),
            None => self.path.to_path_buf(),
        };

        // Check if the root_path exists
        if !root_path.exists() {
            anyhow::bail!("Path does not exist: {:?}", root_path);
        }

        let mut names = WalkDir::new(&root_path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored_name(entry.file_name()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                Some(Self::path_to_name(relative))
            })
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    /// Read a file, failing with `FileNotFound` if it is absent
    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);
        if !file_path.is_file() {
            return Err(RepositoryError::FileNotFound(name.to_string()).into());
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(name)?))
    }

    /// ID the file's current content would have as a blob
    pub fn blob_id(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.parse_blob(name)?.object_id()
    }

    /// Create or overwrite a file, creating its parent directories
    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.is_dir() {
            std::fs::remove_dir_all(&file_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file if present and prune the directories it leaves empty
    pub fn delete_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }
        self.prune_empty_parent_dirs(&file_path)?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn path_to_name(relative: &Path) -> String {
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_ignored_name(name: &std::ffi::OsStr) -> bool {
        IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                Self::is_ignored_name(name)
            } else {
                false
            }
        })
    }
}
