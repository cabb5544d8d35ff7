//! Locked append and creation primitives for the known-hosts file

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Append content to an existing file under an advisory exclusive lock.
///
/// The file must already exist; creation is a separate, earlier step so
/// that a missing parent directory surfaces as its own error. Existing
/// content is never rewritten.
pub fn append_locked(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.lock_exclusive()
        .map_err(|_| Error::LockFailed { path: path.into() })?;

    let outcome = file
        .write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(path, e));

    // Release before propagating any write error (implicit on drop, but
    // be explicit).
    FileExt::unlock(&file).map_err(|_| Error::LockFailed { path: path.into() })?;

    outcome
}

/// Create a new empty file, failing if it already exists.
pub fn create_empty(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Read a file's text content.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
