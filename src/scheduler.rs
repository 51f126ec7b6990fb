//! Periodic refresh task
//!
//! Runs [`EnergyMetricsController::refresh`] immediately and then on a fixed
//! period until stopped. Each tick launches its own refresh, so a response
//! slower than the period overlaps the next one; whichever finishes last
//! determines the published state.

use crate::controller::EnergyMetricsController;
use crate::error::{EnergyError, Result};
use crate::logging::get_logger;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Handle to a running refresh loop
///
/// Dropping the handle cancels the timer as well; in-flight refreshes are
/// left to finish.
pub struct RefreshTask {
    shutdown_tx: mpsc::UnboundedSender<()>,
    handle: JoinHandle<u64>,
}

impl RefreshTask {
    /// Spawn the refresh loop on the current runtime
    pub fn start(controller: Arc<EnergyMetricsController>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(EnergyError::validation(
                "refresh.interval_secs",
                "Must be greater than 0",
            ));
        }

        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel::<()>();
        let logger = get_logger("scheduler");

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks: u64 = 0;

            logger.info(&format!("Refreshing every {}s", period.as_secs()));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        ticks = ticks.saturating_add(1);
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            // Failures are logged and published by the controller
                            let _ = controller.refresh().await;
                        });
                    }
                    _ = shutdown_rx.recv() => {
                        logger.info("Refresh timer cancelled");
                        break;
                    }
                }
            }
            ticks
        });

        Ok(Self {
            shutdown_tx,
            handle,
        })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the timer and wait for the loop to exit
    ///
    /// Returns the number of refreshes that were launched.
    pub async fn stop(self) -> u64 {
        let _ = self.shutdown_tx.send(());
        self.handle.await.unwrap_or(0)
    }
}
