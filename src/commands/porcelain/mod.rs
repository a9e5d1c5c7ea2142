//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: Create a repository holding the root commit on `master`
//! - `add` / `rm`: Stage files, or mark them for removal
//! - `commit`: Record the staged changes
//! - `log`, `global-log`, `find`: Walk the history
//! - `status`: Show branches, staged changes and the state of the working directory
//! - `checkout`: Restore files or switch branches
//! - `branch`, `rm-branch`: Create or delete branches
//! - `reset`: Move the active branch to another commit
//! - `merge`: Merge another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
