//! Traits shared by everything the object stores persist

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use anyhow::Result;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Parses the content that follows an already consumed object header
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Header-less text form
    fn display(&self) -> String;

    /// Identity of the object, by default the hash of its serialized form
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::hash_parts([content.as_ref()]))
    }
}

/// Prefix `content` with its object header
pub fn with_header(object_type: &ObjectType, content: &[u8]) -> Result<Bytes> {
    let header = ObjectHeader {
        object_type: *object_type,
        size: content.len(),
    }
    .encode();

    let mut object_bytes = BytesMut::with_capacity(header.len() + content.len());
    object_bytes.put_slice(header.as_bytes());
    object_bytes.put_slice(content);

    Ok(object_bytes.freeze())
}
