//! Commit history
//!
//! The commit graph owns every commit by ID; branches and parent links refer to
//! commits only through their IDs.

pub mod commit_graph;
