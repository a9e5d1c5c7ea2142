//! Checkout and restore
//!
//! - `migration`: whole-tree restore from one manifest to another, with
//!   untracked-file protection
//! - `target`: the three addressing modes of the `checkout` command

pub mod migration;
pub mod target;
