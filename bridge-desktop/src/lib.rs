//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux):
//! - `HttpClient` using `reqwest`
//! - `PathMonitor` using periodic TCP connect probes
//! - `SettingsStore` using an SQLite key-value table
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ProbePathMonitor, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! let path_monitor = Arc::new(ProbePathMonitor::new());
//! ```

mod http;
mod network;
mod settings;

pub use http::{ReqwestHttpClient, DEFAULT_TIMEOUT};
pub use network::{ProbeConfig, ProbePathMonitor};
pub use settings::SqliteSettingsStore;
