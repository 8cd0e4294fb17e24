use std::path::PathBuf;

pub trait WorkspaceContext {
    fn has_workspace(&self) -> bool;
}

/// Workspace state known up front: either a folder is open or nothing is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub folder: Option<PathBuf>,
}

impl Workspace {
    pub fn empty() -> Self {
        Self { folder: None }
    }

    pub fn open(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: Some(folder.into()),
        }
    }
}

impl WorkspaceContext for Workspace {
    fn has_workspace(&self) -> bool {
        self.folder.is_some()
    }
}
