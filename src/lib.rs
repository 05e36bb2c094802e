//! Workspace façade crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`provider-dropbox`, `provider-slack`, and the reqwest
//! transport from `bridge-desktop`). Host applications can depend on
//! `oauth-connectors` and enable the documented features without needing to
//! wire each crate individually.

pub use core_service::*;
