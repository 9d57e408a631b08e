//! Path monitor fed by the host application
//!
//! Mobile hosts already own a platform path observer. They forward each
//! update with [`HostPathMonitor::publish`], which may be called from any
//! thread, including a platform callback queue outside the tokio runtime.

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::{NetworkPath, PathChangeStream, PathMonitor};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Default)]
struct Subscribers {
    latest: Option<NetworkPath>,
    senders: Vec<mpsc::UnboundedSender<NetworkPath>>,
}

/// [`PathMonitor`] whose updates are pushed in by the host
///
/// A new subscriber first receives the most recent path (if any was
/// published), then every later path in publish order.
#[derive(Default)]
pub struct HostPathMonitor {
    subscribers: Mutex<Subscribers>,
}

impl HostPathMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new path and forward it to every live subscriber
    pub fn publish(&self, path: NetworkPath) {
        let mut subscribers = self.lock();
        trace!(status = ?path.status, receivers = subscribers.senders.len(), "Publishing path");

        subscribers
            .senders
            .retain(|sender| sender.send(path.clone()).is_ok());
        subscribers.latest = Some(path);
    }

    /// Most recently published path
    pub fn latest(&self) -> Option<NetworkPath> {
        self.lock().latest.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        // Nothing panics while the lock is held
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PathMonitor for HostPathMonitor {
    async fn subscribe_changes(&self) -> Result<Box<dyn PathChangeStream>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscribers = self.lock();

        if let Some(latest) = &subscribers.latest {
            // The receiver is alive, this cannot fail
            let _ = sender.send(latest.clone());
        }
        subscribers.senders.push(sender);

        Ok(Box::new(HostChangeStream { receiver }))
    }
}

struct HostChangeStream {
    receiver: mpsc::UnboundedReceiver<NetworkPath>,
}

#[async_trait]
impl PathChangeStream for HostChangeStream {
    async fn next(&mut self) -> Option<NetworkPath> {
        self.receiver.recv().await
    }
}
