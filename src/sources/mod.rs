//! Upstream energy statistics feeds
//!
//! The controller only sees the [`StatsSource`] trait; [`CcafClient`] is the
//! production implementation talking to the Cambridge Centre for Alternative
//! Finance endpoints.

pub mod client;
pub mod types;

pub use client::CcafClient;
pub use types::{DataEnvelope, RawBitcoinStats, RawEthereumStats};

use crate::error::Result;

/// A provider of both raw statistics
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_bitcoin(&self) -> Result<RawBitcoinStats>;
    async fn fetch_ethereum(&self) -> Result<RawEthereumStats>;
}
