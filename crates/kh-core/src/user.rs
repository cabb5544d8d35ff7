//! Target user resolution
//!
//! The reconciliation run operates on behalf of a named account; its
//! numeric identity and home directory are resolved once at the start of
//! the run and failure to resolve is fatal.

use std::path::PathBuf;

use nix::unistd::{Gid, Uid, User};

use crate::{Error, Result};

/// Resolved identity of the account whose known-hosts file is managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub uid: Uid,
    pub gid: Gid,
    pub home: PathBuf,
}

/// Lookup of account identities by name.
pub trait UserDatabase {
    /// Resolve a user name into its numeric identity and home directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserResolution`] when the account does not exist
    /// or the system lookup fails.
    fn resolve(&self, name: &str) -> Result<UserIdentity>;
}

/// User database backed by the system account database (`getpwnam`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUserDatabase;

impl UserDatabase for SystemUserDatabase {
    fn resolve(&self, name: &str) -> Result<UserIdentity> {
        let entry = User::from_name(name)
            .ok()
            .flatten()
            .ok_or_else(|| Error::UserResolution {
                user: name.to_string(),
            })?;

        Ok(UserIdentity {
            name: entry.name,
            uid: entry.uid,
            gid: entry.gid,
            home: entry.dir,
        })
    }
}
