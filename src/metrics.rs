//! Derived comparison metrics
//!
//! Pure functions turning the two raw feeds into the numbers the dashboard
//! shows. Nothing here does I/O, so it is recomputed freely on every read.

use crate::sources::{RawBitcoinStats, RawEthereumStats};
use serde::{Deserialize, Serialize};

/// The Ethereum feed reports kilowatts, the Bitcoin feed gigawatts
pub const KW_PER_GW: f64 = 1_000_000.0;

/// Default floor for the Ethereum share of the adjusted split
pub const DEFAULT_MIN_ETHEREUM_PERCENTAGE: f64 = 2.0;

/// Convert kilowatts to gigawatts
pub fn kw_to_gw(kw: f64) -> f64 {
    kw / KW_PER_GW
}

/// Metrics derived from the most recent raw statistics
///
/// `adjusted_bitcoin_percentage + adjusted_ethereum_percentage` is always 100.
/// The adjusted pair lifts the Ethereum share to the configured floor; the
/// true shares are kept alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedViewModel {
    pub bitcoin_power_gw: f64,
    pub ethereum_power_gw: f64,
    pub total_power_gw: f64,
    pub bitcoin_percentage: f64,
    pub ethereum_percentage: f64,
    pub adjusted_bitcoin_percentage: f64,
    pub adjusted_ethereum_percentage: f64,
    pub bitcoin_lower_bound_gw: Option<f64>,
    pub bitcoin_upper_bound_gw: Option<f64>,
    pub ethereum_min_power_gw: Option<f64>,
    pub ethereum_max_power_gw: Option<f64>,
    /// How many times more power Bitcoin draws; `None` without positive Ethereum power
    pub energy_ratio: Option<f64>,
    /// Percentage saved by proof-of-stake relative to proof-of-work
    pub reduction_percentage: Option<f64>,
}

/// Share of `part` in `total`, as a percentage; 0 when the total is not positive
fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

/// Compute the derived view model
///
/// Missing raw data counts as zero power, matching what is displayed before
/// the first successful refresh.
pub fn derive(
    bitcoin: Option<&RawBitcoinStats>,
    ethereum: Option<&RawEthereumStats>,
    min_ethereum_percentage: f64,
) -> DerivedViewModel {
    let bitcoin_power_gw = bitcoin.map_or(0.0, |b| b.estimated);
    let ethereum_power_gw = ethereum.map_or(0.0, |e| kw_to_gw(e.guess_power));

    let total_power_gw = bitcoin_power_gw + ethereum_power_gw;
    let bitcoin_percentage = share(bitcoin_power_gw, total_power_gw);
    let ethereum_percentage = share(ethereum_power_gw, total_power_gw);

    let adjusted_ethereum_percentage = ethereum_percentage.max(min_ethereum_percentage);
    let adjusted_bitcoin_percentage = 100.0 - adjusted_ethereum_percentage;

    let energy_ratio =
        (ethereum_power_gw > 0.0).then(|| bitcoin_power_gw / ethereum_power_gw);
    let reduction_percentage =
        (bitcoin_power_gw > 0.0).then(|| (1.0 - ethereum_power_gw / bitcoin_power_gw) * 100.0);

    DerivedViewModel {
        bitcoin_power_gw,
        ethereum_power_gw,
        total_power_gw,
        bitcoin_percentage,
        ethereum_percentage,
        adjusted_bitcoin_percentage,
        adjusted_ethereum_percentage,
        bitcoin_lower_bound_gw: bitcoin.map(|b| b.lower_bound),
        bitcoin_upper_bound_gw: bitcoin.map(|b| b.upper_bound),
        ethereum_min_power_gw: ethereum.map(|e| kw_to_gw(e.min_power)),
        ethereum_max_power_gw: ethereum.map(|e| kw_to_gw(e.max_power)),
        energy_ratio,
        reduction_percentage,
    }
}

impl DerivedViewModel {
    /// One-line summary used in logs, e.g. `BTC 150.00 GW vs ETH 0.0029 GW (51724x)`
    pub fn summary(&self) -> String {
        let ratio = match self.energy_ratio {
            Some(r) => format!("{:.0}x", r),
            None => "n/a".to_string(),
        };
        format!(
            "BTC {:.2} GW vs ETH {:.4} GW ({})",
            self.bitcoin_power_gw, self.ethereum_power_gw, ratio
        )
    }
}
