//! Three-way merge
//!
//! - `split_point`: nearest common ancestor of two commits
//! - `resolver`: per-file classification against the split point
//! - `conflict`: conflict marker blocks

pub mod conflict;
pub mod resolver;
pub mod split_point;
