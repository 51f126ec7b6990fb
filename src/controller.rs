//! Energy metrics controller
//!
//! Owns the refresh lifecycle: fetches both feeds, keeps the latest raw
//! values and publishes an immutable [`DashboardState`] to every subscriber.
//! The derived metrics are never stored; [`EnergyMetricsController::view_model`]
//! recomputes them from whatever raw values are currently held.

use crate::config::{Config, DisplayConfig};
use crate::error::{EnergyError, FETCH_FAILED_MESSAGE, Result};
use crate::logging::{StructuredLogger, get_logger};
use crate::metrics::{self, DerivedViewModel};
use crate::sources::{CcafClient, RawBitcoinStats, RawEthereumStats, StatsSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of everything the presentation layer reads
///
/// Each change replaces the whole value, so readers never observe a partial
/// update. Raw data survives failed refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub loading: bool,
    pub error: Option<String>,
    pub bitcoin: Option<RawBitcoinStats>,
    pub ethereum: Option<RawEthereumStats>,
    pub last_updated: Option<DateTime<Utc>>,
    pub refresh_count: u64,
    pub failure_count: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            bitcoin: None,
            ethereum: None,
            last_updated: None,
            refresh_count: 0,
            failure_count: 0,
        }
    }
}

/// State plus derived metrics, as served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub bitcoin: Option<RawBitcoinStats>,
    pub ethereum: Option<RawEthereumStats>,
    pub metrics: DerivedViewModel,
    pub refresh_count: u64,
    pub failure_count: u64,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState, min_ethereum_percentage: f64) -> Self {
        Self {
            loading: state.loading,
            error: state.error.clone(),
            last_updated: state.last_updated,
            bitcoin: state.bitcoin,
            ethereum: state.ethereum,
            metrics: metrics::derive(
                state.bitcoin.as_ref(),
                state.ethereum.as_ref(),
                min_ethereum_percentage,
            ),
            refresh_count: state.refresh_count,
            failure_count: state.failure_count,
        }
    }
}

/// Fetches both feeds and publishes dashboard state
pub struct EnergyMetricsController {
    source: Arc<dyn StatsSource>,
    min_ethereum_percentage: f64,
    state_tx: watch::Sender<Arc<DashboardState>>,
    logger: StructuredLogger,
}

impl EnergyMetricsController {
    /// Out-of-range floors are clamped to `[0, 100]`; a non-finite one falls
    /// back to the default
    pub fn new(source: Arc<dyn StatsSource>, display: &DisplayConfig) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(DashboardState::default()));
        let logger = get_logger("controller");
        let requested = display.min_ethereum_percentage;
        let min_ethereum_percentage = if requested.is_finite() {
            requested.clamp(0.0, 100.0)
        } else {
            metrics::DEFAULT_MIN_ETHEREUM_PERCENTAGE
        };
        if min_ethereum_percentage != requested {
            logger.warn(&format!(
                "Ethereum share floor {} out of range; using {}",
                requested, min_ethereum_percentage
            ));
        }
        Self {
            source,
            min_ethereum_percentage,
            state_tx,
            logger,
        }
    }

    /// Controller backed by the CCAF HTTP feeds
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = CcafClient::new(&config.sources)?;
        Ok(Self::new(Arc::new(client), &config.display))
    }

    /// Fetch both feeds and publish the outcome
    ///
    /// Both raw values are replaced together or not at all. On failure the
    /// previous data stays in place next to the user-facing error message.
    pub async fn refresh(&self) -> Result<()> {
        self.publish(|state| state.loading = true);

        match self.fetch_both().await {
            Ok((bitcoin, ethereum)) => {
                self.publish(|state| {
                    state.bitcoin = Some(bitcoin);
                    state.ethereum = Some(ethereum);
                    state.error = None;
                    state.last_updated = Some(Utc::now());
                    state.loading = false;
                    state.refresh_count += 1;
                });
                let view = self.view_model();
                self.logger
                    .info(&format!("Refreshed energy data: {}", view.metrics.summary()));
                Ok(())
            }
            Err(e) => {
                self.logger
                    .error(&format!("Error fetching energy data: {}", e));
                self.publish(|state| {
                    state.error = Some(FETCH_FAILED_MESSAGE.to_string());
                    state.loading = false;
                    state.refresh_count += 1;
                    state.failure_count += 1;
                });
                Err(match e {
                    EnergyError::FetchFailed { .. } => e,
                    other => EnergyError::fetch_failed(other.to_string()),
                })
            }
        }
    }

    async fn fetch_both(&self) -> Result<(RawBitcoinStats, RawEthereumStats)> {
        let bitcoin = self.source.fetch_bitcoin().await?;
        let ethereum = self.source.fetch_ethereum().await?;
        Ok((bitcoin, ethereum))
    }

    fn publish(&self, update: impl FnOnce(&mut DashboardState)) {
        self.state_tx.send_modify(|current| {
            let mut next = DashboardState::clone(current);
            update(&mut next);
            *current = Arc::new(next);
        });
    }

    /// Receive every published state, starting from the current one
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.state_tx.subscribe()
    }

    /// Current state
    pub fn state(&self) -> Arc<DashboardState> {
        self.state_tx.borrow().clone()
    }

    /// Current state with freshly derived metrics
    pub fn view_model(&self) -> DashboardView {
        DashboardView::from_state(&self.state(), self.min_ethereum_percentage)
    }

    pub fn min_ethereum_percentage(&self) -> f64 {
        self.min_ethereum_percentage
    }
}
