//! Host presence check

use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::gateway::HostKeyGateway;

/// Whether the host already has an entry in the known-hosts file.
///
/// "Not found" is a successful lookup with empty output; a failing
/// lookup propagates as a fatal collaborator error.
pub(crate) fn host_present(gateway: &dyn HostKeyGateway, host: &str, path: &Path) -> Result<bool> {
    let output = gateway.lookup(host, path)?;
    let present = !output.trim().is_empty();
    debug!(host, path = %path.display(), present, "host lookup");
    Ok(present)
}
