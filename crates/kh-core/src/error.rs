//! Error types for kh-core
//!
//! Every error is fatal to the run: the engine has no internal retry or
//! rollback, and any failure surfaces to the caller immediately.

use std::path::PathBuf;

/// Result type for kh-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during reconciliation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Target user does not exist
    #[error("User not found: {user}")]
    UserResolution { user: String },

    /// Host file absent, parent directory absent, directory management declined
    #[error("Parent directory missing: {path} (directory management is disabled)")]
    DirectoryMissing { path: PathBuf },

    /// Unable to create an empty known-hosts file
    #[error("Failed to create {path}: {source}")]
    FileCreation {
        path: PathBuf,
        #[source]
        source: kh_fs::Error,
    },

    /// Unable to append a new host entry
    #[error("Failed to write host entry to {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: kh_fs::Error,
    },

    /// External key tool invocation failed or returned a non-zero status
    #[error("Command failed: {command}: {detail}")]
    Collaborator { command: String, detail: String },

    /// Unable to read or parse a scan settings file
    #[error("Failed to load settings from {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// Invalid desired-state value at the input boundary
    #[error("Invalid state {value:?}: expected \"present\" or \"absent\"")]
    InvalidPresence { value: String },

    /// Filesystem error from kh-fs
    #[error(transparent)]
    Fs(#[from] kh_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
