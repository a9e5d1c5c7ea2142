//! Staging index file format
//!
//! The index stores the staging area between commands: the blobs staged for the
//! next commit and the names marked for removal.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "TWIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged entry count (4 bytes)
//!   - Removed entry count (4 bytes)
//!
//! Staged entries:
//!   - Blob ID (20 bytes)
//!   - Name length (2 bytes) followed by the UTF-8 name
//!
//! Removed entries:
//!   - Name length (2 bytes) followed by the UTF-8 name
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16; // 4 bytes for marker, 4 for version, 4 + 4 for entry counts

/// Magic signature identifying index files
pub const SIGNATURE: &str = "TWIX";

/// Index file format version
pub const VERSION: u32 = 1;
