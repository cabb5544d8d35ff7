//! Desired-state input model

use std::str::FromStr;

use serde::Serialize;

use crate::Error;

/// Whether a host's entry should exist in the known-hosts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Present,
    Absent,
}

impl FromStr for Presence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(Error::InvalidPresence {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// Immutable description of the target state for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredState {
    /// Account whose known-hosts file is managed.
    pub user: String,
    /// Host name (or `[host]:port`) whose entry is managed. Opaque to the
    /// core; passed through to the external tools verbatim.
    pub host: String,
    /// Desired membership.
    pub presence: Presence,
    /// Explicit file location; derived as `<home>/.ssh/known_hosts` when
    /// absent.
    pub path: Option<String>,
    /// Desired permission bits for the file.
    pub mode: u32,
    /// Whether to create and own the parent directory.
    pub manage_dir: bool,
}

impl DesiredState {
    /// Target state with the defaults of the CLI surface: present,
    /// derived path, mode 0600, directory managed.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            presence: Presence::Present,
            path: None,
            mode: 0o600,
            manage_dir: true,
        }
    }
}
