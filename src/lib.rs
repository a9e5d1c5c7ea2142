//! twig: a small, local, single-user version-control system
//!
//! - `areas`: on-disk stores (objects, staging index, refs, journal) and the working directory
//! - `artifacts`: domain types and algorithms (objects, history, merge, checkout, status)
//! - `commands`: one `impl Repository` block per user-facing command
//! - `errors`: user-facing failures

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
