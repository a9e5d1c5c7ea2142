//! Commit journal
//!
//! An append-only file listing every commit ID in creation order, one per line.
//! It backs `global-log` and `find`, and gives the commit graph its insertion order.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, new)]
pub struct Journal {
    path: Box<Path>,
}

impl Journal {
    pub fn append(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let mut journal_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open journal at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut journal_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut()
            .write_all(format!("{oid}\n").as_bytes())
            .with_context(|| format!("failed to append to journal at {:?}", self.path))?;

        Ok(())
    }

    /// Every recorded commit ID, oldest first
    pub fn read_all(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read journal at {:?}", self.path))?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ObjectId::try_parse(line.to_string()))
            .collect()
    }
}
