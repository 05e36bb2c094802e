//! # Host Bridge Traits
//!
//! Abstractions the connectors require from the host but do not implement
//! themselves.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - one request, one response, raw bytes
//! - [`LoggerSink`](log::LoggerSink) - forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Every bridge uses [`BridgeError`](error::BridgeError). Implementations
//! should convert platform errors into it and keep the message actionable
//! (URL, status, underlying cause).
//!
//! ## Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod log;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
