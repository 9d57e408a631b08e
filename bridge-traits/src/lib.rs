//! # Host Bridge Traits
//!
//! Capability traits the host platform implements for the core.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Buffered HTTP requests
//! - [`PathMonitor`](network::PathMonitor) - Network path updates (reachability source)
//! - [`SettingsStore`](storage::SettingsStore) - Typed key-value preferences
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | iOS      | host app            | 📋 Planned |
//!
//! A host that cannot provide a capability should let the core fail fast
//! during configuration (see `core_runtime::config`) rather than shipping a
//! stub that silently does nothing.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should map platform failures onto the closest variant and keep the
//! platform message in the payload.
//!
//! ## Thread Safety
//!
//! Every trait requires `Send + Sync` so implementations can be shared behind
//! `Arc` across tokio tasks.

pub mod error;
pub mod http;
pub mod network;
pub mod storage;
pub mod time;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use network::{NetworkPath, PathChangeStream, PathMonitor, PathStatus, UnsatisfiedReason};
pub use storage::SettingsStore;
pub use time::{BufferedLogger, Clock, LogEntry, LogLevel, LoggerSink, SystemClock};
