//! Stored object kinds and the `<kind> <size>\0` header in front of every object

use anyhow::{Context, bail};
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the header and return only the kind
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        ObjectHeader::parse(data_reader).map(|header| header.object_type)
    }
}

/// Decoded object header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Read `<kind> <size>\0` from the front of `data_reader`
    ///
    /// The reader is left positioned at the first content byte.
    pub fn parse(data_reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut raw = Vec::new();
        data_reader
            .read_until(b'\0', &mut raw)
            .context("Unable to read object header")?;

        if raw.pop() != Some(b'\0') {
            bail!("Corrupt object header: missing NUL terminator");
        }

        let raw = std::str::from_utf8(&raw).context("Corrupt object header: not UTF-8")?;
        let (kind, size) = raw
            .split_once(' ')
            .with_context(|| format!("Corrupt object header: {raw:?}"))?;

        Ok(ObjectHeader {
            object_type: kind.parse()?,
            size: size
                .parse()
                .with_context(|| format!("Corrupt object header: bad size {size:?}"))?,
        })
    }

    pub fn encode(&self) -> String {
        format!("{} {}\0", self.object_type, self.size)
    }

    /// Fail unless `actual` content bytes follow the header
    pub fn verify_size(&self, actual: usize) -> anyhow::Result<()> {
        if self.size != actual {
            bail!(
                "Corrupt {} object: header declares {} bytes, found {}",
                self.object_type,
                self.size,
                actual
            );
        }

        Ok(())
    }
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            other => bail!("Unknown object kind {other:?}"),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
