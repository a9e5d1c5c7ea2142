//! On-disk repository components
//!
//! - `database`: Content-addressed store for blobs and commits (used twice: permanent and staging)
//! - `index`: Staged files and the files marked for removal
//! - `journal`: Commit IDs in creation order
//! - `refs`: Branch heads and the active branch
//! - `repository`: The aggregate every command runs against
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod journal;
pub mod refs;
pub mod repository;
pub mod workspace;
