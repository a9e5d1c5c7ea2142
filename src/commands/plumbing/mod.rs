//! Plumbing commands
//!
//! - `write_commit`: turn the staging index into a commit on the active branch

pub mod write_commit;
