//! Command implementations
//!
//! - `plumbing`: building blocks shared by several commands (writing a commit)
//! - `porcelain`: the user-facing commands (add, commit, merge, ...)
//!
//! Every command is an `impl Repository` block writing its output through
//! `Repository::writer`.

pub mod plumbing;
pub mod porcelain;
