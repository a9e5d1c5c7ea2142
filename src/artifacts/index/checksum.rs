use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::{Context, bail};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Stream over the index file that hashes every byte passing through
///
/// The caller holds the file lock for as long as the stream lives.
#[derive(Debug)]
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
}

impl<S> Checksum<S> {
    pub fn new(stream: S) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
        }
    }
}

impl<S: Read> Checksum<S> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.stream
            .read_exact(&mut buffer)
            .context("Unexpected end of index file")?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Compare the trailing checksum with everything read so far
    ///
    /// The checksum must be the last thing in the file.
    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut expected)
            .context("Index file is missing its checksum")?;

        if expected != self.digest.clone().finalize().as_slice() {
            bail!("Index checksum does not match its contents");
        }

        let mut trailing = [0u8; 1];
        if self.stream.read(&mut trailing)? != 0 {
            bail!("Unexpected data after index checksum");
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream
            .write_all(data)
            .context("Unable to write index file")?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.stream
            .write_all(checksum.as_slice())
            .context("Unable to write index checksum")?;

        self.stream.flush().context("Unable to flush index file")
    }
}
