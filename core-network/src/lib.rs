//! # Network Module
//!
//! Reachability tracking and reachability-aware HTTP fetches:
//! - [`ReachabilityMonitor`]: consumes host path events, exposes snapshots
//! - [`NetworkService`]: single GET per call with a closed error taxonomy
//! - [`HostPathMonitor`]: path source the host pushes updates into

pub mod error;
pub mod host;
pub mod reachability;
pub mod service;

pub use error::{NetworkError, Result, TransportError};
pub use host::HostPathMonitor;
pub use reachability::{ReachabilityMonitor, ReachabilityState};
pub use service::{FetchConfig, NetworkService};
