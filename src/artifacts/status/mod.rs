//! Working tree status inspection
//!
//! Compares the working directory against the current commit and the staging
//! index.
//!
//! ## Components
//!
//! - `file_change`: Kinds of unstaged workspace changes
//! - `status_info`: Status report aggregation and display

pub mod file_change;
pub mod status_info;
