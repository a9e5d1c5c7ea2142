//! Content-addressed object store
//!
//! Objects live under `<root>/<first-2-hex>/<remaining-38-hex>`, zlib-compressed.
//! Writes go through a temp file and a rename, and storing an object that already
//! exists is a no-op. The repository keeps two stores of this kind: the permanent
//! `objects/` store and the `staging/` store holding blobs added since the last commit.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store an object, returning its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, object.serialize()?)?;
            debug!(oid = %object_id.to_short_oid(), kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    /// Persist raw file content as a blob
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    /// Raw content of a stored blob
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.parse_object_as_blob(object_id)?
            .map(Blob::into_content)
            .with_context(|| format!("Object {object_id} is not a blob"))
    }

    /// Copy an object from another store into this one, byte for byte
    pub fn import_from(&self, other: &Database, object_id: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());
        if object_path.exists() {
            return Ok(());
        }

        self.write_object(object_path, other.load(object_id)?)?;
        debug!(oid = %object_id.to_short_oid(), from = %other.path.display(), "imported object");

        Ok(())
    }

    /// Decompressed bytes of an object, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_path)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Remove every object from this store
    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_dir_all(&self.path).with_context(|| {
                format!("Unable to clear object store {}", self.path.display())
            })?;
        }
        std::fs::create_dir_all(&self.path).with_context(|| {
            format!("Unable to create object store {}", self.path.display())
        })?;

        Ok(())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let total = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let header = ObjectHeader::parse(&mut object_reader)
            .with_context(|| format!("Unable to parse object {object_id}"))?;
        header.verify_size(total - object_reader.position() as usize)?;

        Ok((header.object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        std::fs::write(&temp_object_path, Self::compress(object_content)?).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // the rename publishes the object atomically
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose ID starts with the given prefix.
    ///
    /// Only the directory named by the first two characters is searched, so the
    /// prefix must be at least two characters long. Several matches mean the
    /// prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();
        if prefix.len() < 2 || !prefix.is_char_boundary(2) {
            return Ok(matches);
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let file_name_str = file_name.to_string_lossy();

                if file_name_str.starts_with(file_prefix) {
                    let full_oid = format!("{}{}", dir_name, file_name_str);
                    if let Ok(oid) = ObjectId::try_parse(full_oid) {
                        matches.push(oid);
                    }
                }
            }
        }
        matches.sort();

        Ok(matches)
    }
}
