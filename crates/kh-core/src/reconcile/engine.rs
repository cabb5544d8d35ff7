//! ReconcileEngine implementation
//!
//! The engine coordinates the target state (desired presence, path, mode)
//! with the actual state of the user's known-hosts file.

use tracing::debug;

use kh_fs::{AttributeEnforcer, Attributes};

use crate::gateway::{HostKeyGateway, OpenSshGateway};
use crate::settings::ScanSettings;
use crate::state::{DesiredState, Presence};
use crate::user::{SystemUserDatabase, UserDatabase};
use crate::Result;

use super::locator::{HostFileLocator, Located};
use super::{ReconcileOptions, ReconcileReport, mutator, presence};

/// Engine for reconciling one host entry against its desired state
///
/// One call to [`ReconcileEngine::reconcile`] performs a single pass:
///
/// 1. Resolve the target user's identity
/// 2. Locate the known-hosts file, managing the parent directory
/// 3. Check whether the host already has an entry
/// 4. Add or remove the entry if membership drifted
/// 5. Enforce the file's ownership and mode
///
/// Presence and attributes are reconciled independently and both checked
/// every run, so a single pass converges regardless of which axis
/// drifted. There is no rollback; any failure aborts the run.
pub struct ReconcileEngine {
    users: Box<dyn UserDatabase>,
    keys: Box<dyn HostKeyGateway>,
}

impl ReconcileEngine {
    /// Create an engine with explicit collaborators.
    pub fn new(users: Box<dyn UserDatabase>, keys: Box<dyn HostKeyGateway>) -> Self {
        Self { users, keys }
    }

    /// Create an engine backed by the system account database and the
    /// OpenSSH tools.
    pub fn with_system_defaults(settings: ScanSettings) -> Self {
        Self::new(
            Box::new(SystemUserDatabase),
            Box::new(OpenSshGateway::new(settings)),
        )
    }

    /// Reconcile the known-hosts file to the desired state.
    ///
    /// Returns the report with the aggregated `changed` flag. In check
    /// mode no mutation is performed but `changed` still predicts what a
    /// real run would report, with one documented exception: when the
    /// host file itself is missing, the run stops after predicting its
    /// creation and does not additionally probe attribute enforcement.
    pub fn reconcile(
        &self,
        desired: &DesiredState,
        options: ReconcileOptions,
    ) -> Result<ReconcileReport> {
        let identity = self.users.resolve(&desired.user)?;
        let mut report = ReconcileReport::new(desired);
        let enforcer = AttributeEnforcer::new(options.check);

        let locator = HostFileLocator::new(&identity, enforcer, options.check);
        let path = match locator.locate(desired, &mut report)? {
            Located::Ready(path) => path,
            Located::EarlyExit => return Ok(report),
        };

        let host_present = presence::host_present(self.keys.as_ref(), &desired.host, &path)?;
        let host_desired = desired.presence == Presence::Present;

        if !host_present && host_desired {
            if !options.check {
                mutator::add_host(self.keys.as_ref(), &desired.host, &path)?;
            }
            report.changed = true;
        } else if host_present && !host_desired {
            if !options.check {
                mutator::remove_host(self.keys.as_ref(), &desired.host, &path)?;
            }
            report.changed = true;
        } else {
            debug!(host = %desired.host, "membership already converged");
        }

        // Runs even when no content changed; permissions drift
        // independently of membership.
        let attrs = Attributes {
            uid: identity.uid,
            gid: identity.gid,
            mode: desired.mode,
        };
        report.changed |= enforcer.enforce_file(&path, attrs)?;

        Ok(report)
    }
}
