//! State reconciliation core for the known-hosts manager
//!
//! This crate decides whether a host's entry in a user's SSH known-hosts
//! file matches a declared target state and applies the minimal set of
//! idempotent corrections:
//!
//! - **Host file location**: resolve the known-hosts path (explicit or
//!   derived from the target user's home), optionally creating and owning
//!   the parent `.ssh` directory
//! - **Presence reconciliation**: add or remove the host's entry via the
//!   external key-scanning and key-lookup tools
//! - **Attribute reconciliation**: converge the file's owner, group, and
//!   mode independently of content
//!
//! # Architecture
//!
//! `kh-core` sits between the filesystem primitives and the CLI:
//!
//! ```text
//!        kh-cli
//!          |
//!       kh-core
//!          |
//!        kh-fs
//! ```
//!
//! External collaborators (the user database and the host-key tools) are
//! injected as trait objects so tests can substitute fakes.

pub mod error;
pub mod gateway;
pub mod reconcile;
pub mod settings;
pub mod state;
pub mod user;

pub use error::{Error, Result};
pub use gateway::{HostKeyGateway, OpenSshGateway};
pub use reconcile::{ReconcileEngine, ReconcileOptions, ReconcileReport};
pub use settings::ScanSettings;
pub use state::{DesiredState, Presence};
pub use user::{SystemUserDatabase, UserDatabase, UserIdentity};
