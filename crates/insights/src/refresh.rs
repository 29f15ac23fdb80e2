//! Background task that re-primes the primary dashboard views on a fixed
//! interval, regardless of cache staleness.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

use crate::service::InsightsService;

/// Handle to a running refresh task.
pub struct RefreshHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the task to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

/// Spawn the refresh loop.
///
/// The first interval tick fires immediately and is skipped so startup
/// does not double-fetch views the server is about to serve anyway.
pub fn spawn_refresh(service: Arc<InsightsService>, period: Duration) -> RefreshHandle {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "view refresh task starting");
        let mut ticker = interval(period);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("view refresh task received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = service.refresh_primary().await {
                        warn!(error = %e, "view refresh failed; keeping previous entries");
                    }
                }
            }
        }

        info!("view refresh task stopped");
    });

    RefreshHandle { shutdown_tx, task }
}
