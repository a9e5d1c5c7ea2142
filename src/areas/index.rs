//! Staging index
//!
//! Holds the state that lives between commits:
//! - `staged`: file name -> blob ID for every add/modify queued for the next commit
//! - `removed`: file names marked by `rm`, to be dropped from the next commit
//!
//! A name is never in both at once. A successful commit empties both.
//!
//! ## Index File Format
//!
//! See [`crate::artifacts::index`]. The file ends with a SHA-1 checksum of its
//! contents, verified on every load.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::{Context, anyhow};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::ops::DerefMut;
use std::path::Path;

/// Size of the length prefix in front of every name
const NAME_LENGTH_SIZE: usize = 2;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    staged: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            staged: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staged(&self) -> &BTreeMap<String, ObjectId> {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_staged(&self, name: &str) -> bool {
        self.staged.contains_key(name)
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    /// No staged additions and no pending removals
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Queue a blob for the next commit, clearing any removal mark
    pub fn stage(&mut self, name: String, oid: ObjectId) {
        self.removed.remove(&name);
        self.staged.insert(name, oid);
        self.changed = true;
    }

    pub fn unstage(&mut self, name: &str) -> Option<ObjectId> {
        let previous = self.staged.remove(name);
        self.changed |= previous.is_some();
        previous
    }

    /// Mark a name for removal, dropping any staged version of it
    pub fn mark_removed(&mut self, name: String) {
        self.staged.remove(&name);
        self.removed.insert(name);
        self.changed = true;
    }

    pub fn unmark_removed(&mut self, name: &str) -> bool {
        let was_removed = self.removed.remove(name);
        self.changed |= was_removed;
        was_removed
    }

    /// Forget every staged entry and removal mark
    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.staged.clear();
        self.removed.clear();
    }

    /// Load the index from disk
    ///
    /// Reads the index file, parses the header and entries, and verifies
    /// the checksum. If the file doesn't exist or is empty, the index is empty.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.staged.clear();
        self.removed.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("failed to open index at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        // if the index file is empty, return early
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock.deref_mut());
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.staged_count {
            let oid_bytes = reader.read(OBJECT_ID_LENGTH / 2)?;
            let oid = ObjectId::read_h40_from(&mut &oid_bytes[..])?;
            let name = Self::parse_name(&mut reader)?;
            self.staged.insert(name, oid);
        }

        for _ in 0..header.removed_count {
            let name = Self::parse_name(&mut reader)?;
            self.removed.insert(name);
        }

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum<impl Read>) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    fn parse_name(reader: &mut Checksum<impl Read>) -> anyhow::Result<String> {
        let length_bytes = reader.read(NAME_LENGTH_SIZE)?;
        let length = NetworkEndian::read_u16(&length_bytes) as usize;
        let name_bytes = reader.read(length)?;

        String::from_utf8(name_bytes.to_vec()).context("Invalid file name in index")
    }

    fn pack_name(name: &str) -> anyhow::Result<Vec<u8>> {
        let length = u16::try_from(name.len())
            .with_context(|| format!("File name too long for the index: {name}"))?;

        let mut bytes = Vec::with_capacity(NAME_LENGTH_SIZE + name.len());
        bytes.write_u16::<NetworkEndian>(length)?;
        bytes.extend_from_slice(name.as_bytes());

        Ok(bytes)
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("failed to open index at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock.deref_mut());

        let header = IndexHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.staged.len() as u32,
            self.removed.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for (name, oid) in &self.staged {
            let mut entry_bytes = Vec::new();
            oid.write_h40_to(&mut entry_bytes)?;
            entry_bytes.extend(Self::pack_name(name)?);
            writer.write(&entry_bytes)?;
        }

        for name in &self.removed {
            writer.write(&Self::pack_name(name)?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
