//! Network Path Monitoring via TCP probes
//!
//! Desktop operating systems expose path changes through very different
//! APIs (netlink, SystemConfiguration, Network List Manager). This adapter
//! takes the portable route: it periodically opens a TCP connection to a few
//! well-known endpoints and reports a path change whenever the outcome flips.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    network::{NetworkPath, PathChangeStream, PathMonitor, PathStatus, UnsatisfiedReason},
};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tracing::{debug, trace};

/// Probe settings
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// `host:port` endpoints; the path is satisfied if any accepts a connection
    pub targets: Vec<String>,
    /// Delay between probe rounds
    pub interval: Duration,
    /// Per-target connect deadline
    pub connect_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            targets: vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()],
            interval: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

/// Desktop path monitor backed by TCP connect probes
///
/// Desktop links are reported as never expensive; there is no portable way
/// to detect metered Wi-Fi.
#[derive(Debug, Clone, Default)]
pub struct ProbePathMonitor {
    config: ProbeConfig,
}

impl ProbePathMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Run one probe round
    pub async fn probe(&self) -> NetworkPath {
        probe_targets(&self.config).await
    }
}

async fn probe_targets(config: &ProbeConfig) -> NetworkPath {
    if config.targets.is_empty() {
        return NetworkPath {
            status: PathStatus::RequiresConnection,
            unsatisfied_reason: None,
            is_expensive: false,
        };
    }

    for target in &config.targets {
        match timeout(config.connect_timeout, TcpStream::connect(target.as_str())).await {
            Ok(Ok(_)) => {
                trace!(target = %target, "Probe connected");
                return NetworkPath::satisfied();
            }
            Ok(Err(e)) => trace!(target = %target, error = %e, "Probe refused"),
            Err(_) => trace!(target = %target, "Probe timed out"),
        }
    }

    NetworkPath::unsatisfied(UnsatisfiedReason::NotAvailable)
}

#[async_trait]
impl PathMonitor for ProbePathMonitor {
    async fn subscribe_changes(&self) -> Result<Box<dyn PathChangeStream>> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            BridgeError::NotAvailable("path probing requires a Tokio runtime".to_string())
        })?;

        let (tx, rx) = mpsc::channel(8);
        let config = self.config.clone();

        handle.spawn(async move {
            let mut last: Option<NetworkPath> = None;
            loop {
                let path = probe_targets(&config).await;
                if last.as_ref() != Some(&path) {
                    debug!(status = ?path.status, "Network path changed");
                    if tx.send(path.clone()).await.is_err() {
                        break;
                    }
                    last = Some(path);
                }

                tokio::select! {
                    _ = tx.closed() => break,
                    _ = sleep(config.interval) => {}
                }
            }
            debug!("Path probe loop stopped");
        });

        Ok(Box::new(ProbeChangeStream { rx }))
    }
}

struct ProbeChangeStream {
    rx: mpsc::Receiver<NetworkPath>,
}

#[async_trait]
impl PathChangeStream for ProbeChangeStream {
    async fn next(&mut self) -> Option<NetworkPath> {
        self.rx.recv().await
    }
}
