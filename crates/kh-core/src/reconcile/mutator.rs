//! Host entry mutation

use std::path::Path;

use tracing::info;

use crate::gateway::HostKeyGateway;
use crate::{Error, Result};

/// Scan the host's keys and append them verbatim to the end of the file.
///
/// Existing content is never rewritten or deduplicated. A failed append
/// is a [`Error::FileWrite`], distinct from a failed scan.
pub(crate) fn add_host(gateway: &dyn HostKeyGateway, host: &str, path: &Path) -> Result<()> {
    let keys = gateway.scan(host)?;
    kh_fs::io::append_locked(path, &keys).map_err(|source| Error::FileWrite {
        path: path.into(),
        source,
    })?;
    info!(host, path = %path.display(), "added host entry");
    Ok(())
}

/// Remove the host's entry, preserving all others.
///
/// The removal tool is trusted to rewrite the file in place.
pub(crate) fn remove_host(gateway: &dyn HostKeyGateway, host: &str, path: &Path) -> Result<()> {
    gateway.remove(host, path)?;
    info!(host, path = %path.display(), "removed host entry");
    Ok(())
}
