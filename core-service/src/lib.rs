//! Core service façade and bootstrap helpers.
//!
//! This crate wires a [`CoreConfig`] (and the host bridges it carries) into
//! the resource loader, the reachability monitor, the fetch service and the
//! typed settings store. Desktop apps typically enable the `desktop-shims`
//! feature, which supplies reqwest, TCP-probe and SQLite bridges for
//! anything the host does not inject.
//!
//! ```ignore
//! let core = CoreService::new(
//!     CoreConfig::builder()
//!         .resource_root("/path/to/Resources")
//!         .http_client(http)
//!         .path_monitor(path_monitor)
//!         .build()?,
//! )
//! .await?;
//!
//! core.start_monitoring()?;
//! let colors: Vec<Color> = core.loader().load_all(&ResourceId::new("colors"))?;
//! let release: Release = core.network().fetch_json("https://example.com/latest").await?;
//! ```

pub mod error;

pub use error::{CoreError, Result};

pub use core_runtime::config::{CoreConfig, CoreConfigBuilder, ReachabilityPolicy};

use core_network::{FetchConfig, NetworkService, ReachabilityMonitor};
use core_resources::{LocalJsonLoader, ResourceLocator};
use core_runtime::settings::TypedSettings;
use std::sync::Arc;
use tracing::info;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    config: Arc<CoreConfig>,
    reachability: Arc<ReachabilityMonitor>,
    network: Arc<NetworkService>,
    loader: LocalJsonLoader,
    settings: Option<TypedSettings>,
}

impl CoreService {
    /// Build every component from `config`.
    ///
    /// Opens the settings store when one is configured. Monitoring is not
    /// started; call [`start_monitoring`](Self::start_monitoring).
    pub async fn new(config: CoreConfig) -> Result<Self> {
        let settings = config.open_settings_store().await?.map(TypedSettings::new);

        let reachability = Arc::new(ReachabilityMonitor::new(Arc::clone(&config.path_monitor)));
        let network = Arc::new(NetworkService::new(
            Arc::clone(&config.http_client),
            Arc::clone(&reachability),
            FetchConfig::from(&config),
        ));
        let loader = LocalJsonLoader::new(ResourceLocator::new(&config.resource_root));

        info!(
            timeout_ms = config.request_timeout.as_millis() as u64,
            policy = ?config.reachability_policy,
            settings = settings.is_some(),
            "Core service initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            reachability,
            network,
            loader,
            settings,
        })
    }

    /// Start tracking network reachability (no-op when already running).
    pub fn start_monitoring(&self) -> Result<()> {
        self.reachability.start()?;
        Ok(())
    }

    pub async fn stop_monitoring(&self) {
        self.reachability.stop().await;
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn reachability(&self) -> &Arc<ReachabilityMonitor> {
        &self.reachability
    }

    pub fn network(&self) -> &Arc<NetworkService> {
        &self.network
    }

    pub fn loader(&self) -> &LocalJsonLoader {
        &self.loader
    }

    /// Typed settings, `None` when the host configured no settings store
    pub fn settings(&self) -> Option<&TypedSettings> {
        self.settings.as_ref()
    }
}

impl std::fmt::Debug for CoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreService")
            .field("config", &self.config)
            .field("reachability", &self.reachability)
            .field("settings", &self.settings.is_some())
            .finish()
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// Uses the desktop bridges for HTTP, path monitoring and settings, and
/// starts reachability monitoring right away.
///
/// ```no_run
/// # #[cfg(feature = "desktop-shims")]
/// # async fn example() -> core_service::Result<()> {
/// let core = core_service::bootstrap_desktop("/path/to/Resources", "/path/to/settings.db").await?;
/// assert!(core.settings().is_some());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub async fn bootstrap_desktop(
    resource_root: impl AsRef<std::path::Path>,
    settings_path: impl AsRef<std::path::Path>,
) -> Result<CoreService> {
    let config = CoreConfig::builder()
        .resource_root(resource_root)
        .settings_path(settings_path)
        .build()?;

    let core = CoreService::new(config).await?;
    core.start_monitoring()?;
    Ok(core)
}
