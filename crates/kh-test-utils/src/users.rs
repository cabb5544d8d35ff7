//! Fake user database for engine tests.

use std::path::{Path, PathBuf};

use nix::unistd::{getgid, getuid};

use kh_core::{Error, Result, UserDatabase, UserIdentity};

/// A user database that resolves every name to the current process's
/// uid/gid and a chosen home directory.
///
/// Tests chown to the invoking user, which succeeds without privileges,
/// while the home points into a tempdir so no real account is touched.
#[derive(Debug, Clone)]
pub struct FakeUserDatabase {
    home: PathBuf,
    /// When set, only this name resolves; others fail like a real lookup.
    known_name: Option<String>,
}

impl FakeUserDatabase {
    /// Resolve any user name to the current identity with `home` as the
    /// home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            known_name: None,
        }
    }

    /// Restrict resolution to a single known account name.
    pub fn known_only(mut self, name: impl Into<String>) -> Self {
        self.known_name = Some(name.into());
        self
    }

    /// The configured home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }
}

impl UserDatabase for FakeUserDatabase {
    fn resolve(&self, name: &str) -> Result<UserIdentity> {
        if let Some(known) = &self.known_name
            && known != name
        {
            return Err(Error::UserResolution {
                user: name.to_string(),
            });
        }
        Ok(UserIdentity {
            name: name.to_string(),
            uid: getuid(),
            gid: getgid(),
            home: self.home.clone(),
        })
    }
}
