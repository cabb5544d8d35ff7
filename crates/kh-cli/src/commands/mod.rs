//! Command implementations for kh-cli

pub mod reconcile;

pub use reconcile::run_reconcile;
