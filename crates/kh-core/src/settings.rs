//! Scan tool settings
//!
//! Optional overrides for how the external OpenSSH tools are invoked.
//! Loaded from a TOML file when one is supplied; every field falls back
//! to a built-in default.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// How the external key tools are invoked.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// Binary used to scan a host's public keys.
    pub keyscan_bin: String,
    /// Binary used to look up and remove entries (`-F` / `-R`).
    pub keygen_bin: String,
    /// Connection timeout passed to the scanner (`-T`).
    pub timeout_secs: u64,
    /// Restrict scanning to these key types (`-t`), comma-separated.
    pub key_types: Option<String>,
    /// Store hashed host names (`-H`).
    pub hash_hosts: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            keyscan_bin: "ssh-keyscan".to_string(),
            keygen_bin: "ssh-keygen".to_string(),
            timeout_secs: 5,
            key_types: None,
            hash_hosts: false,
        }
    }
}

impl ScanSettings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Settings {
            path: path.into(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Settings {
            path: path.into(),
            message: e.to_string(),
        })
    }
}
