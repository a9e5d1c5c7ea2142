use crate::errors::RepositoryError;

/// What a `checkout` invocation restores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// `checkout -- <file>`: a file from the current commit
    File { name: String },
    /// `checkout <commit> -- <file>`: a file from an (abbreviated) commit
    CommitFile { commit: String, name: String },
    /// `checkout <branch>`: the whole tree of a branch head
    Branch { name: String },
}

impl CheckoutTarget {
    /// Classify the positional target and the file given after `--`
    pub fn try_from_args(target: Option<String>, file: Option<String>) -> anyhow::Result<Self> {
        match (target, file) {
            (None, Some(name)) => Ok(CheckoutTarget::File { name }),
            (Some(commit), Some(name)) => Ok(CheckoutTarget::CommitFile { commit, name }),
            (Some(name), None) => Ok(CheckoutTarget::Branch { name }),
            (None, None) => Err(RepositoryError::Usage.into()),
        }
    }
}
