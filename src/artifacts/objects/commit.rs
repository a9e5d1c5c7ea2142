//! Commit object
//!
//! Commits are immutable snapshot nodes. Each one carries:
//! - The commit message
//! - The creation timestamp (fixed at construction)
//! - At most one parent commit ID (`None` only for the root commit)
//! - The complete manifest of tracked files (name -> blob ID), not a delta
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! timestamp <rfc3339-with-nanoseconds>
//! file <blob-sha> <name-byte-length> <name>
//! file <blob-sha> <name-byte-length> <name>
//!
//! <commit message>
//! ```
//!
//! Names carry their byte length because they may contain spaces or newlines.
//! The message is everything after the blank line, kept byte for byte.
//!
//! ## Identity
//!
//! A commit's ID is the SHA-1 of `message ‖ timestamp ‖ parent-id` (empty for the root).
//! The manifest never takes part in it, so two commits sharing all three fields
//! collide; the commit command refuses to write such a commit.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Complete set of tracked files of a commit
pub type Manifest = BTreeMap<String, ObjectId>;

/// Message of the commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    manifest: Manifest,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parent: Option<ObjectId>,
        manifest: Manifest,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            manifest,
        }
    }

    /// The root commit: no parent, empty manifest
    pub fn initial(timestamp: DateTime<FixedOffset>) -> Self {
        Self::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp,
            None,
            Manifest::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Blob tracked under `name`, if any
    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.manifest.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.manifest.contains_key(name)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn timestamp_key(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, false)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self.display();
        with_header(&self.object_type(), content.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let mut rest = content.as_str();

        let parent = match rest.strip_prefix("parent ") {
            Some(after) => {
                let (parent_oid, tail) = split_line(after)?;
                rest = tail;
                Some(ObjectId::try_parse(parent_oid.to_string())?)
            }
            None => None,
        };

        let after = rest
            .strip_prefix("timestamp ")
            .context("Invalid commit object: missing timestamp line")?;
        let (timestamp, tail) = split_line(after)?;
        rest = tail;
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .context("Invalid commit object: malformed timestamp")?;

        let mut manifest = Manifest::new();
        while let Some(entry) = rest.strip_prefix("file ") {
            let (oid, tail) = entry
                .split_once(' ')
                .context("Invalid commit object: file line without name length")?;
            let (length, tail) = tail
                .split_once(' ')
                .context("Invalid commit object: file line without name")?;
            let length: usize = length
                .parse()
                .context("Invalid commit object: malformed name length")?;
            let (name, tail) = tail
                .split_at_checked(length)
                .context("Invalid commit object: truncated file name")?;

            rest = tail
                .strip_prefix('\n')
                .context("Invalid commit object: unterminated file line")?;
            manifest.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        let message = rest
            .strip_prefix('\n')
            .context("Invalid commit object: missing blank line before message")?;

        Ok(Self::new(message.to_string(), timestamp, parent, manifest))
    }
}

fn split_line(text: &str) -> anyhow::Result<(&str, &str)> {
    text.split_once('\n')
        .context("Invalid commit object: unterminated header line")
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("timestamp {}", self.timestamp_key()));
        for (name, oid) in &self.manifest {
            lines.push(format!("file {oid} {} {name}", name.len()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        let timestamp = self.timestamp_key();
        let parent = self.parent.as_ref().map(AsRef::as_ref).unwrap_or("");

        Ok(ObjectId::hash_parts([
            self.message.as_bytes(),
            timestamp.as_bytes(),
            parent.as_bytes(),
        ]))
    }
}
