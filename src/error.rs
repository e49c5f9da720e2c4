use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Indirection through a handle that has no target.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    #[error("cannot follow a handle that was never bound")]
    Unbound,

    #[error("cannot follow a null handle")]
    Null,
}

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("failed to write narration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load config from {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Handle(#[from] HandleError),
}

impl DemoError {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
