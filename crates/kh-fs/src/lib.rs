//! Filesystem primitives for the known-hosts manager
//!
//! Provides target-user path expansion, locked append I/O, and
//! ownership/permission enforcement for files and directories.

pub mod attrs;
pub mod error;
pub mod io;
pub mod path;

pub use attrs::{AttributeEnforcer, Attributes};
pub use error::{Error, Result};
pub use path::expand_user_path;
