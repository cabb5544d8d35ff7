//! Ownership and permission enforcement
//!
//! Compares a path's current owner, group, and permission bits against a
//! desired specification and applies the difference. Security labels are
//! left to platform defaults; no explicit relabeling is performed.

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

use nix::unistd::{Gid, Uid, chown};
use tracing::debug;

use crate::{Error, Result};

/// Desired ownership and permission bits for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub uid: Uid,
    pub gid: Gid,
    /// Permission bits, e.g. `0o600`. Only the low 12 bits are compared.
    pub mode: u32,
}

/// Makes a file or directory's attributes match a desired specification.
///
/// With `dry_run` set, reports whether a change would be needed without
/// touching the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct AttributeEnforcer {
    dry_run: bool,
}

impl AttributeEnforcer {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Enforce attributes on a file. Returns whether anything changed
    /// (or would change, in dry-run mode).
    pub fn enforce_file(&self, path: &Path, attrs: Attributes) -> Result<bool> {
        self.enforce(path, attrs)
    }

    /// Enforce attributes on a directory. Returns whether anything changed
    /// (or would change, in dry-run mode).
    pub fn enforce_dir(&self, path: &Path, attrs: Attributes) -> Result<bool> {
        self.enforce(path, attrs)
    }

    fn enforce(&self, path: &Path, attrs: Attributes) -> Result<bool> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            // A dry run may probe a path that only a real run would have
            // created; it would be created with the desired attributes.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.dry_run => {
                return Ok(true);
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        let mut changed = false;

        let current_mode = meta.permissions().mode() & 0o7777;
        let desired_mode = attrs.mode & 0o7777;
        if current_mode != desired_mode {
            debug!(
                path = %path.display(),
                current = format_args!("0{current_mode:o}"),
                desired = format_args!("0{desired_mode:o}"),
                "permission drift"
            );
            if !self.dry_run {
                fs::set_permissions(path, fs::Permissions::from_mode(desired_mode))
                    .map_err(|e| Error::io(path, e))?;
            }
            changed = true;
        }

        if meta.uid() != attrs.uid.as_raw() || meta.gid() != attrs.gid.as_raw() {
            debug!(
                path = %path.display(),
                uid = attrs.uid.as_raw(),
                gid = attrs.gid.as_raw(),
                "ownership drift"
            );
            if !self.dry_run {
                chown(path, Some(attrs.uid), Some(attrs.gid)).map_err(|source| Error::Chown {
                    path: path.into(),
                    source,
                })?;
            }
            changed = true;
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::{getgid, getuid};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn own_attrs(mode: u32) -> Attributes {
        Attributes {
            uid: getuid(),
            gid: getgid(),
            mode,
        }
    }

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn reports_unchanged_when_attributes_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("known_hosts");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let enforcer = AttributeEnforcer::new(false);
        assert!(!enforcer.enforce_file(&path, own_attrs(0o600)).unwrap());
    }

    #[test]
    fn corrects_mode_drift() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("known_hosts");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let enforcer = AttributeEnforcer::new(false);
        assert!(enforcer.enforce_file(&path, own_attrs(0o600)).unwrap());
        assert_eq!(mode_of(&path), 0o600);

        // Second pass converges.
        assert!(!enforcer.enforce_file(&path, own_attrs(0o600)).unwrap());
    }

    #[test]
    fn dry_run_detects_drift_without_applying() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("known_hosts");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let enforcer = AttributeEnforcer::new(true);
        assert!(enforcer.enforce_file(&path, own_attrs(0o600)).unwrap());
        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn dry_run_on_missing_path_predicts_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent");

        let enforcer = AttributeEnforcer::new(true);
        assert!(enforcer.enforce_file(&path, own_attrs(0o600)).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn missing_path_is_an_error_outside_dry_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent");

        let enforcer = AttributeEnforcer::new(false);
        assert!(enforcer.enforce_file(&path, own_attrs(0o600)).is_err());
    }

    #[test]
    fn enforces_directory_mode() {
        let dir = tempdir().unwrap();
        let ssh_dir = dir.path().join(".ssh");
        fs::create_dir(&ssh_dir).unwrap();
        fs::set_permissions(&ssh_dir, fs::Permissions::from_mode(0o755)).unwrap();

        let enforcer = AttributeEnforcer::new(false);
        assert!(enforcer.enforce_dir(&ssh_dir, own_attrs(0o700)).unwrap());
        assert_eq!(mode_of(&ssh_dir), 0o700);
    }
}
