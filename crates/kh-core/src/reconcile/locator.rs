//! Host file location and parent directory management

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tracing::{debug, info};

use kh_fs::{AttributeEnforcer, Attributes, expand_user_path};

use crate::user::UserIdentity;
use crate::{DesiredState, Error, Result};

use super::ReconcileReport;

const SSH_DIR_MODE: u32 = 0o700;

/// Outcome of locating the host file.
pub(crate) enum Located {
    /// File exists (or was just created); reconciliation continues.
    Ready(PathBuf),
    /// Check mode with the file missing: nothing further can be
    /// simulated against a hypothetical file, so the run stops here.
    EarlyExit,
}

pub(crate) struct HostFileLocator<'a> {
    identity: &'a UserIdentity,
    enforcer: AttributeEnforcer,
    check: bool,
}

impl<'a> HostFileLocator<'a> {
    pub(crate) fn new(identity: &'a UserIdentity, enforcer: AttributeEnforcer, check: bool) -> Self {
        Self {
            identity,
            enforcer,
            check,
        }
    }

    /// Resolve the known-hosts path, managing the parent directory when
    /// requested, and make sure the file exists before presence checks run.
    pub(crate) fn locate(
        &self,
        desired: &DesiredState,
        report: &mut ReconcileReport,
    ) -> Result<Located> {
        let (ssh_dir, file) = match &desired.path {
            Some(raw) => {
                let file = expand_user_path(raw, &self.identity.home);
                let dir = file
                    .parent()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/"));
                (dir, file)
            }
            None => {
                let dir = self.identity.home.join(".ssh");
                let file = dir.join("known_hosts");
                (dir, file)
            }
        };
        report.path = file.display().to_string();

        if desired.manage_dir {
            if !ssh_dir.exists() {
                report.changed = true;
                if !self.check {
                    fs::create_dir_all(&ssh_dir).map_err(|e| kh_fs::Error::io(&ssh_dir, e))?;
                    fs::set_permissions(&ssh_dir, fs::Permissions::from_mode(SSH_DIR_MODE))
                        .map_err(|e| kh_fs::Error::io(&ssh_dir, e))?;
                    info!(path = %ssh_dir.display(), "created ssh directory");
                }
            }
            // Enforced whether freshly created or pre-existing; permissions
            // may have drifted independently of existence.
            let dir_attrs = Attributes {
                uid: self.identity.uid,
                gid: self.identity.gid,
                mode: SSH_DIR_MODE,
            };
            report.changed |= self.enforcer.enforce_dir(&ssh_dir, dir_attrs)?;
        }

        if !file.exists() {
            if !ssh_dir.exists() && !desired.manage_dir {
                return Err(Error::DirectoryMissing { path: ssh_dir });
            }
            report.changed = true;
            if self.check {
                debug!(path = %file.display(), "host file missing; stopping simulation");
                return Ok(Located::EarlyExit);
            }
            kh_fs::io::create_empty(&file).map_err(|source| Error::FileCreation {
                path: file.clone(),
                source,
            })?;
            info!(path = %file.display(), "created empty known-hosts file");
        }

        Ok(Located::Ready(file))
    }
}
