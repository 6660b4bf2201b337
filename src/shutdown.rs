use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Handles graceful teardown of the background workers
///
/// Teardown order:
/// 1. Signal workers over the watch channel; any in-flight simulated
///    delay is cancelled and its pending mutation suppressed
/// 2. Wait for every worker task to exit
pub struct ShutdownCoordinator {
    shutdown_tx: watch::Sender<bool>,
    worker_handles: Vec<JoinHandle<()>>,
}

impl ShutdownCoordinator {
    pub fn new(shutdown_tx: watch::Sender<bool>, worker_handles: Vec<JoinHandle<()>>) -> Self {
        Self {
            shutdown_tx,
            worker_handles,
        }
    }

    /// Perform the shutdown sequence
    pub async fn shutdown(self) {
        info!("Signalling workers to stop...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal to workers: {:?}", e);
        }

        let num_workers = self.worker_handles.len();
        info!("Waiting for {} worker(s) to stop...", num_workers);
        for (i, handle) in self.worker_handles.into_iter().enumerate() {
            match handle.await {
                Ok(_) => info!("Worker {} stopped ({}/{})", i + 1, i + 1, num_workers),
                Err(e) => error!("Worker {} failed to stop: {:?}", i + 1, e),
            }
        }

        info!("Graceful shutdown completed successfully");
    }
}
