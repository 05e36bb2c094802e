//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the provider connectors:
//! - Logging and tracing infrastructure
//! - Configuration management, including loading credentials from the
//!   environment
//!
//! ## Overview
//!
//! Provider crates never read the environment or install subscribers
//! themselves. Hosts call [`logging::init_logging`] once at startup and build
//! a [`config::ConnectorConfig`] that is handed to each client.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CallbackScheme, ConnectorConfig, ConnectorConfigBuilder};
pub use error::{Error, Result};
