//! Network Path Abstraction
//!
//! Hosts report the state of the current network path (the route the OS
//! would use for outgoing traffic) through a [`PathMonitor`]. The core never
//! polls the platform itself; it consumes the stream of path updates.

use crate::error::Result;

/// Satisfiability of the current network path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStatus {
    /// The path is usable for outgoing connections
    Satisfied,
    /// No usable path; see [`UnsatisfiedReason`]
    Unsatisfied,
    /// A path may become available once a connection is established
    /// (e.g. VPN on demand). Also the state before any update was observed.
    RequiresConnection,
}

/// Why a path is not satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsatisfiedReason {
    /// No interface offers a route
    NotAvailable,
    /// The user disabled cellular data for this app
    CellularDenied,
    /// The user disabled Wi-Fi for this app
    WifiDenied,
    /// Local network access was denied
    LocalNetworkDenied,
    /// A required VPN is not active
    VpnInactive,
}

/// Snapshot of a network path as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPath {
    pub status: PathStatus,
    pub unsatisfied_reason: Option<UnsatisfiedReason>,
    /// Metered or otherwise costly route (cellular, personal hotspot)
    pub is_expensive: bool,
}

impl NetworkPath {
    pub fn satisfied() -> Self {
        Self {
            status: PathStatus::Satisfied,
            unsatisfied_reason: None,
            is_expensive: false,
        }
    }

    pub fn unsatisfied(reason: UnsatisfiedReason) -> Self {
        Self {
            status: PathStatus::Unsatisfied,
            unsatisfied_reason: Some(reason),
            is_expensive: false,
        }
    }

    pub fn expensive(mut self, is_expensive: bool) -> Self {
        self.is_expensive = is_expensive;
        self
    }
}

/// Source of network path updates
///
/// # Platform Support
///
/// - **iOS/macOS**: `NWPathMonitor`, forwarded by the host
/// - **Android**: `ConnectivityManager.NetworkCallback`
/// - **Desktop**: TCP probing (`bridge-desktop`)
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::PathMonitor;
///
/// async fn log_changes(monitor: &dyn PathMonitor) -> Result<()> {
///     let mut stream = monitor.subscribe_changes().await?;
///     while let Some(path) = stream.next().await {
///         tracing::info!(status = ?path.status, "path changed");
///     }
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait PathMonitor: Send + Sync {
    /// Subscribe to path updates
    ///
    /// Implementations should emit the current path as soon as it is known
    /// and then one event per change, in the order the platform reported
    /// them.
    async fn subscribe_changes(&self) -> Result<Box<dyn PathChangeStream>>;
}

/// Stream of network path updates
#[async_trait::async_trait]
pub trait PathChangeStream: Send {
    /// Get the next path update
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<NetworkPath>;
}
