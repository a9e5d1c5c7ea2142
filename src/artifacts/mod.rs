//! Domain types and algorithms
//!
//! - `branch`: Branch names
//! - `checkout`: Whole-tree restore and checkout addressing modes
//! - `core`: Shared utilities (pager wrapper, configuration)
//! - `history`: The commit graph
//! - `index`: Staging index file format
//! - `merge`: Split point search, merge classification and conflict blocks
//! - `objects`: Object types (blob, commit)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod history;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
