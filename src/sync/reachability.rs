//! Network reachability state.
//!
//! The platform's path monitor pushes updates in; the sync manager reads a
//! synchronous boolean out. The gate is constructed by the caller and passed
//! around explicitly rather than living behind a process-wide singleton.

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Tracks whether the network is currently reachable.
pub struct ReachabilityGate {
    status: watch::Sender<bool>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl ReachabilityGate {
    pub fn new(initially_reachable: bool) -> Self {
        let (status, _) = watch::channel(initially_reachable);
        Self {
            status,
            monitor: Mutex::new(None),
        }
    }

    /// Current reachability, as last reported by the monitor.
    pub fn is_reachable(&self) -> bool {
        *self.status.borrow()
    }

    /// Record a reachability change.
    pub fn set_reachable(&self, reachable: bool) {
        self.status.send_replace(reachable);
    }

    /// Subscribe to reachability changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }

    /// Forward updates from a platform path monitor into the gate.
    ///
    /// Runs until the sender side is dropped or [`stop_monitoring`] is
    /// called. Starting again replaces the previous monitor task.
    ///
    /// [`stop_monitoring`]: ReachabilityGate::stop_monitoring
    pub async fn start_monitoring(&self, mut updates: mpsc::Receiver<bool>) {
        let status = self.status.clone();
        let handle = tokio::spawn(async move {
            while let Some(reachable) = updates.recv().await {
                debug!(reachable, "network path changed");
                status.send_replace(reachable);
            }
        });

        if let Some(previous) = self.monitor.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Stop forwarding monitor updates; the last reported state sticks.
    pub async fn stop_monitoring(&self) {
        if let Some(handle) = self.monitor.lock().await.take() {
            handle.abort();
        }
    }
}
