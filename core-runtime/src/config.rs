//! # Core Configuration Module
//!
//! The configuration system uses a builder pattern to construct a
//! [`CoreConfig`] holding every dependency and setting the core needs. It
//! fails fast: a missing bridge or an out-of-range value is reported by
//! [`CoreConfigBuilder::build`], not on first use.
//!
//! ## Bridges
//!
//! - `HttpClient` - HTTP transport (desktop default: reqwest)
//! - `PathMonitor` - network path notifications (desktop default: TCP probes)
//! - `SettingsStore` - optional key-value preferences (desktop default:
//!   SQLite, opened from `settings_path`)
//!
//! When the `desktop-shims` feature is disabled every bridge must be
//! injected, otherwise `build()` returns [`Error::CapabilityMissing`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, ReachabilityPolicy};
//! use std::time::Duration;
//!
//! let config = CoreConfig::builder()
//!     .resource_root("/path/to/bundle/Resources")
//!     .request_timeout(Duration::from_secs(10))
//!     .reachability_policy(ReachabilityPolicy::Advisory)
//!     .http_client(Arc::new(MyHttpClient))
//!     .path_monitor(Arc::new(MyPathMonitor))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, PathMonitor, SettingsStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default timeout applied to each fetch
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound accepted for `request_timeout`
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// How the fetch service treats the reachability snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachabilityPolicy {
    /// Refuse to issue a request while the path is not satisfied
    #[default]
    FailFast,
    /// Log the unsatisfied path and let the transport decide
    Advisory,
}

/// Core configuration.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Directory bundled JSON resources are resolved against
    pub resource_root: PathBuf,

    /// Timeout for a single fetch, transport included
    pub request_timeout: Duration,

    pub reachability_policy: ReachabilityPolicy,

    pub http_client: Arc<dyn HttpClient>,

    pub path_monitor: Arc<dyn PathMonitor>,

    /// Injected preferences store, takes precedence over `settings_path`
    pub settings_store: Option<Arc<dyn SettingsStore>>,

    /// Location of the default SQLite settings database
    pub settings_path: Option<PathBuf>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("resource_root", &self.resource_root)
            .field("request_timeout", &self.request_timeout)
            .field("reachability_policy", &self.reachability_policy)
            .field("http_client", &"HttpClient { ... }")
            .field("path_monitor", &"PathMonitor { ... }")
            .field(
                "settings_store",
                &self.settings_store.as_ref().map(|_| "SettingsStore { ... }"),
            )
            .field("settings_path", &self.settings_path)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Resource root is not empty
    /// - Request timeout is greater than zero and at most 10 minutes
    /// - Settings path, when given, is not empty
    pub fn validate(&self) -> Result<()> {
        if self.resource_root.as_os_str().is_empty() {
            return Err(Error::Config("Resource root cannot be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(format!(
                "Request timeout exceeds maximum of {} seconds",
                MAX_REQUEST_TIMEOUT.as_secs()
            )));
        }

        if let Some(path) = &self.settings_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("Settings path cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Resolve the preferences store.
    ///
    /// Returns the injected store if there is one. Otherwise, with the
    /// `desktop-shims` feature and a `settings_path`, opens the SQLite
    /// store at that path. `Ok(None)` means the host provides no settings.
    pub async fn open_settings_store(&self) -> Result<Option<Arc<dyn SettingsStore>>> {
        if let Some(store) = &self.settings_store {
            return Ok(Some(store.clone()));
        }

        match &self.settings_path {
            Some(path) => open_default_settings_store(path).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for network fetches. \
                 Desktop: enable the 'desktop-shims' feature to use the default ReqwestHttpClient. \
                 Mobile: inject a client backed by the platform URL session."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn path_monitor_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "PathMonitor".to_string(),
        message: "PathMonitor implementation is required for reachability tracking. \
                 Desktop: enable the 'desktop-shims' feature to use the default ProbePathMonitor. \
                 Mobile: inject a HostPathMonitor and publish platform path updates into it."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(request_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(request_timeout).map_err(|e| {
        Error::Internal(format!("Failed to initialize default HttpClient: {}", e))
    })?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_request_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_path_monitor() -> Result<Arc<dyn PathMonitor>> {
    use bridge_desktop::ProbePathMonitor;

    let monitor: Arc<dyn PathMonitor> = Arc::new(ProbePathMonitor::new());
    Ok(monitor)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_path_monitor() -> Result<Arc<dyn PathMonitor>> {
    Err(path_monitor_missing_error())
}

#[cfg(feature = "desktop-shims")]
async fn open_default_settings_store(path: &Path) -> Result<Arc<dyn SettingsStore>> {
    use bridge_desktop::SqliteSettingsStore;

    let store = SqliteSettingsStore::new(path.to_path_buf())
        .await
        .map_err(|e| {
            Error::Internal(format!("Failed to initialize default SettingsStore: {}", e))
        })?;
    let store: Arc<dyn SettingsStore> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
async fn open_default_settings_store(_path: &Path) -> Result<Arc<dyn SettingsStore>> {
    Err(Error::CapabilityMissing {
        capability: "SettingsStore".to_string(),
        message: "A settings path was configured but no SettingsStore is available. \
                 Desktop: enable the 'desktop-shims' feature to use the default SqliteSettingsStore. \
                 Mobile: inject a store backed by the platform preferences API."
            .to_string(),
    })
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    resource_root: Option<PathBuf>,
    request_timeout: Option<Duration>,
    reachability_policy: ReachabilityPolicy,
    http_client: Option<Arc<dyn HttpClient>>,
    path_monitor: Option<Arc<dyn PathMonitor>>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    settings_path: Option<PathBuf>,
}

impl CoreConfigBuilder {
    /// Sets the directory bundled resources are read from (required).
    pub fn resource_root(mut self, path: impl AsRef<Path>) -> Self {
        self.resource_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the per-fetch timeout (default: 30 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn reachability_policy(mut self, policy: ReachabilityPolicy) -> Self {
        self.reachability_policy = policy;
        self
    }

    /// Injects the HTTP transport.
    ///
    /// Optional when the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Injects the network path source.
    ///
    /// Optional when the `desktop-shims` feature is enabled.
    pub fn path_monitor(mut self, monitor: Arc<dyn PathMonitor>) -> Self {
        self.path_monitor = Some(monitor);
        self
    }

    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Sets where the default SQLite settings database lives.
    pub fn settings_path(mut self, path: impl AsRef<Path>) -> Self {
        self.settings_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// Returns an error if:
    /// - `resource_root` was not set
    /// - A bridge is missing and no desktop default is available
    /// - A value is out of range
    pub fn build(self) -> Result<CoreConfig> {
        let resource_root = self.resource_root.ok_or_else(|| {
            Error::Config("Resource root is required. Use .resource_root() to set it.".to_string())
        })?;

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout)?,
        };

        let path_monitor = match self.path_monitor {
            Some(monitor) => monitor,
            None => provide_default_path_monitor()?,
        };

        let config = CoreConfig {
            resource_root,
            request_timeout,
            reachability_policy: self.reachability_policy,
            http_client,
            path_monitor,
            settings_store: self.settings_store,
            settings_path: self.settings_path,
        };

        config.validate()?;

        Ok(config)
    }
}
