//! Repository object types
//!
//! Everything the repository persists is an object identified by a SHA-1 hash:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot node (message, timestamp, parent id, full file manifest)
//!
//! Blobs serialize to `blob <size>\0<content>` and are identified by the hash of
//! that serialization. Commits are identified by the hash of their message,
//! timestamp and parent id only (see [`commit::Commit::object_id`]).

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest accepted abbreviation of a commit id
pub const MIN_ABBREVIATED_ID_LENGTH: usize = 6;
