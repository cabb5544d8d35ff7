//! Error types for kh-fs

use std::path::PathBuf;

/// Result type for kh-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kh-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Failed to change ownership of {path}: {source}")]
    Chown {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
