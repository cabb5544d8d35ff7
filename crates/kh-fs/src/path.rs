//! Path expansion against a target user's home directory
//!
//! Paths supplied on the command line are expanded relative to the
//! *target* user's home, not the invoking user's, so `~` keeps meaning
//! "the managed account" even when run under sudo.

use std::path::{Path, PathBuf};

/// Expand a user-supplied path into an absolute path.
///
/// - `~` and `~/rest` resolve into `home`
/// - absolute paths pass through unchanged
/// - relative paths are anchored at `home`
pub fn expand_user_path(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return home.join(rest);
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        home.join(path)
    }
}
