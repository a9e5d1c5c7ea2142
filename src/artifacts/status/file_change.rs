use colored::Colorize;

/// Workspace change that is not reflected in the staging index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl WorkspaceChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }

    /// `name (modified)` / `name (deleted)`
    pub fn format_entry(&self, name: &str) -> String {
        format!("{} ({})", name.red(), self.label())
    }
}
