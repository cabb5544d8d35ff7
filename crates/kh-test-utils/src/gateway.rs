//! Scripted host-key gateway for engine tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kh_core::{Error, HostKeyGateway, Result};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Scan { host: String },
    Lookup { host: String, path: PathBuf },
    Remove { host: String, path: PathBuf },
}

/// A host-key gateway that works directly on the file instead of shelling
/// out.
///
/// - `scan` returns a deterministic fake key line for the host
/// - `lookup` returns the file's lines mentioning the host
/// - `remove` rewrites the file, dropping lines mentioning the host
///
/// Every call is recorded; clones share the recording, so tests can keep
/// a handle after boxing the gateway into the engine.
#[derive(Debug, Clone, Default)]
pub struct FakeKeyGateway {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    fail_scan: bool,
}

impl FakeKeyGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `scan` fail, simulating an unreachable host.
    pub fn failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }

    /// The deterministic entry line `scan` produces for a host.
    pub fn key_line(host: &str) -> String {
        format!("{host} ssh-ed25519 AAAAC3NzaC1lZDI1NTE5FAKEKEY{host}\n")
    }

    /// All calls recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn record(&self, invocation: Invocation) {
        self.invocations.lock().unwrap().push(invocation);
    }
}

impl HostKeyGateway for FakeKeyGateway {
    fn scan(&self, host: &str) -> Result<String> {
        self.record(Invocation::Scan {
            host: host.to_string(),
        });
        if self.fail_scan {
            return Err(Error::Collaborator {
                command: format!("fake-keyscan {host}"),
                detail: "scripted failure".to_string(),
            });
        }
        Ok(Self::key_line(host))
    }

    fn lookup(&self, host: &str, path: &Path) -> Result<String> {
        self.record(Invocation::Lookup {
            host: host.to_string(),
            path: path.to_path_buf(),
        });
        let content = std::fs::read_to_string(path).map_err(|e| Error::Collaborator {
            command: format!("fake-keygen -F {host}"),
            detail: e.to_string(),
        })?;
        let matching: String = content
            .lines()
            .filter(|line| line.contains(host))
            .map(|line| format!("{line}\n"))
            .collect();
        Ok(matching)
    }

    fn remove(&self, host: &str, path: &Path) -> Result<()> {
        self.record(Invocation::Remove {
            host: host.to_string(),
            path: path.to_path_buf(),
        });
        let content = std::fs::read_to_string(path).map_err(|e| Error::Collaborator {
            command: format!("fake-keygen -R {host}"),
            detail: e.to_string(),
        })?;
        let remaining: String = content
            .lines()
            .filter(|line| !line.contains(host))
            .map(|line| format!("{line}\n"))
            .collect();
        std::fs::write(path, remaining).map_err(|e| Error::Collaborator {
            command: format!("fake-keygen -R {host}"),
            detail: e.to_string(),
        })?;
        Ok(())
    }
}
