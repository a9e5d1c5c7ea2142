//! User-facing repository failures
//!
//! Each variant is a precondition or lookup failure that a command reports to the
//! user and that leaves the repository untouched. They travel inside
//! `anyhow::Error` and are recovered with `downcast_ref` by the binary, which
//! prints the message and exits normally. Anything else (I/O, corrupt objects) is
//! a real error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error(
        "A twig version-control system already exists in the current directory ({})",
        .0.display()
    )]
    RepositoryAlreadyExists(PathBuf),
    #[error("Not in an initialized twig directory.")]
    NotInitialized,
    #[error("Incorrect operands.")]
    Usage,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("File does not exist.")]
    FileNotFound(String),
    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),
    #[error("No reason to remove the file.")]
    NoOpRemoval(String),
    #[error("No changes added to the commit.")]
    EmptyChangeSet,
    #[error("No commit with that id exists.")]
    CommitNotFound(String),
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("Cannot remove the current branch.")]
    CannotRemoveActiveBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("Cannot merge a branch with itself.")]
    CannotMergeSelf,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay(Vec<String>),
    #[error("A commit with id {0} already exists.")]
    CommitIdCollision(String),
}

impl RepositoryError {
    /// Whether the failure stems from how the command was invoked
    pub fn is_usage(&self) -> bool {
        matches!(self, RepositoryError::Usage)
    }
}
