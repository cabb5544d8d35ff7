//! Shared test utilities for the known-hosts manager workspace.
//!
//! This crate provides fake collaborators so engine tests never touch the
//! system account database or invoke the real OpenSSH tools. It is a
//! dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`gateway`] — [`FakeKeyGateway`](gateway::FakeKeyGateway), a scripted
//!   host-key tool that records invocations
//! - [`users`] — [`FakeUserDatabase`](users::FakeUserDatabase) resolving
//!   every name to the current process's identity and a chosen home

pub mod gateway;
pub mod users;

pub use gateway::{FakeKeyGateway, Invocation};
pub use users::FakeUserDatabase;
