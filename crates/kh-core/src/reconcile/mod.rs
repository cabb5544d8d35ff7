//! Reconciliation of a host entry against its desired state
//!
//! The engine drives location, presence checking, mutation, and attribute
//! enforcement in one pass, accumulating a single `changed` flag.

mod engine;
mod locator;
mod mutator;
mod presence;

pub use engine::ReconcileEngine;

use serde::Serialize;

use crate::state::{DesiredState, Presence};

/// Options for a reconciliation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// If true, perform all read-only inspection but none of the mutating
    /// steps, still computing an accurate `changed` prediction.
    pub check: bool,
}

/// Result of one reconciliation run: the aggregated `changed` flag plus
/// the echoed input parameters.
///
/// `changed` is monotonic within a run; once set it is never reset.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub changed: bool,
    pub user: String,
    pub host: String,
    pub state: Presence,
    /// Resolved absolute path of the known-hosts file.
    pub path: String,
    /// Desired permission bits, octal (e.g. `"0600"`).
    pub mode: String,
    pub manage_dir: bool,
}

impl ReconcileReport {
    pub(crate) fn new(desired: &DesiredState) -> Self {
        Self {
            changed: false,
            user: desired.user.clone(),
            host: desired.host.clone(),
            state: desired.presence,
            path: String::new(),
            mode: format!("0{:o}", desired.mode & 0o7777),
            manage_dir: desired.manage_dir,
        }
    }
}
