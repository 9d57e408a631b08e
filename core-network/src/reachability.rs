//! # Reachability Monitor
//!
//! Tracks the current network path reported by a [`PathMonitor`].
//!
//! Path events flow over the host's change stream to a single consumer
//! task, which applies them in arrival order and publishes each result
//! through a `watch` channel. Readers only ever see whole snapshots.
//!
//! ## Lifecycle
//!
//! ```text
//! unmonitored --start()--> monitoring --stop()--> unmonitored
//! ```
//!
//! - `start()` while monitoring is a no-op.
//! - After `stop()` the last snapshot stays readable but no longer changes.
//!   A later `start()` subscribes again.
//!
//! ```ignore
//! let monitor = Arc::new(ReachabilityMonitor::new(path_monitor));
//! monitor.start()?;
//!
//! if monitor.is_reachable() {
//!     // worth trying a request
//! }
//! ```

use bridge_traits::time::{Clock, SystemClock};
use bridge_traits::{NetworkPath, PathMonitor, PathStatus, UnsatisfiedReason};
use chrono::{DateTime, Utc};
use core_runtime::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Last applied network path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityState {
    pub status: PathStatus,
    /// Only set while `status` is not `Satisfied`
    pub unsatisfied_reason: Option<UnsatisfiedReason>,
    pub is_expensive: bool,
    /// When the last path event was applied, `None` before the first one
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ReachabilityState {
    fn default() -> Self {
        Self {
            status: PathStatus::RequiresConnection,
            unsatisfied_reason: None,
            is_expensive: false,
            updated_at: None,
        }
    }
}

impl ReachabilityState {
    fn applied(path: NetworkPath, at: DateTime<Utc>) -> Self {
        let unsatisfied_reason = match path.status {
            PathStatus::Satisfied => None,
            _ => path.unsatisfied_reason,
        };

        Self {
            status: path.status,
            unsatisfied_reason,
            is_expensive: path.is_expensive,
            updated_at: Some(at),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.status == PathStatus::Satisfied
    }

    /// True until the first path event has been applied
    pub fn is_initial(&self) -> bool {
        self.updated_at.is_none()
    }
}

struct MonitorTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct ReachabilityMonitor {
    source: Arc<dyn PathMonitor>,
    clock: Arc<dyn Clock>,
    state: Arc<watch::Sender<ReachabilityState>>,
    task: Mutex<Option<MonitorTask>>,
}

impl ReachabilityMonitor {
    pub fn new(source: Arc<dyn PathMonitor>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn PathMonitor>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(ReachabilityState::default());
        Self {
            source,
            clock,
            state: Arc::new(state),
            task: Mutex::new(None),
        }
    }

    /// Begin consuming path events on the current tokio runtime
    ///
    /// Returns immediately; the subscription happens on the spawned task.
    /// Fails only when called outside a tokio runtime.
    pub fn start(&self) -> Result<()> {
        let mut slot = self.task_slot();

        if let Some(task) = slot.as_ref() {
            if !task.handle.is_finished() {
                debug!("Reachability monitor already running");
                return Ok(());
            }
        }

        let runtime = Handle::try_current().map_err(|e| {
            Error::Internal(format!(
                "Reachability monitor requires a Tokio runtime: {}",
                e
            ))
        })?;

        let token = CancellationToken::new();
        let handle = runtime.spawn(consume_paths(
            Arc::clone(&self.source),
            Arc::clone(&self.clock),
            Arc::clone(&self.state),
            token.clone(),
        ));

        *slot = Some(MonitorTask { token, handle });
        info!("Reachability monitoring started");
        Ok(())
    }

    /// Stop consuming path events
    ///
    /// Once this returns no further event is applied; the last snapshot is
    /// kept.
    pub async fn stop(&self) {
        let task = self.task_slot().take();

        if let Some(task) = task {
            task.token.cancel();
            if let Err(e) = task.handle.await {
                warn!(error = %e, "Reachability task ended abnormally");
            }
            info!("Reachability monitoring stopped");
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.task_slot()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    pub fn snapshot(&self) -> ReachabilityState {
        self.state.borrow().clone()
    }

    /// Point-in-time `status == Satisfied`; may already be stale
    pub fn is_reachable(&self) -> bool {
        self.state.borrow().is_reachable()
    }

    pub fn status(&self) -> PathStatus {
        self.state.borrow().status
    }

    /// Receiver that is notified after every applied event
    pub fn subscribe(&self) -> watch::Receiver<ReachabilityState> {
        self.state.subscribe()
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<MonitorTask>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task_slot().take() {
            task.token.cancel();
        }
    }
}

impl std::fmt::Debug for ReachabilityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReachabilityMonitor")
            .field("state", &*self.state.borrow())
            .field("monitoring", &self.is_monitoring())
            .finish()
    }
}

async fn consume_paths(
    source: Arc<dyn PathMonitor>,
    clock: Arc<dyn Clock>,
    state: Arc<watch::Sender<ReachabilityState>>,
    token: CancellationToken,
) {
    let subscription = tokio::select! {
        _ = token.cancelled() => return,
        subscription = source.subscribe_changes() => subscription,
    };

    let mut stream = match subscription {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "Failed to subscribe to path changes");
            return;
        }
    };

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            next = stream.next() => match next {
                Some(path) => apply(&state, path, clock.now()),
                None => {
                    debug!("Path change stream closed");
                    break;
                }
            },
        }
    }
}

fn apply(state: &watch::Sender<ReachabilityState>, path: NetworkPath, at: DateTime<Utc>) {
    let next = ReachabilityState::applied(path, at);
    let previous = state.send_replace(next.clone());

    if previous.status != next.status {
        info!(
            from = ?previous.status,
            to = ?next.status,
            reason = ?next.unsatisfied_reason,
            expensive = next.is_expensive,
            "Network path changed"
        );
    } else {
        debug!(status = ?next.status, expensive = next.is_expensive, "Network path updated");
    }
}
