//! # pos-energy - Proof-of-Work vs Proof-of-Stake power comparison
//!
//! Fetches the Cambridge Centre for Alternative Finance estimates of Bitcoin
//! and Ethereum power draw, derives comparison metrics and serves them to a
//! presentation layer over HTTP.
//!
//! ## Architecture
//!
//! - `config`: YAML configuration with defaults and validation
//! - `logging`: Structured logging and tracing
//! - `sources`: HTTP client for the two statistics feeds
//! - `metrics`: Pure derivation of the comparison numbers
//! - `controller`: Refresh lifecycle and published dashboard state
//! - `scheduler`: Cancellable periodic refresh
//! - `chains`: Proof-of-stake chain showcase and data attribution
//! - `web`: REST API and server-sent events

pub mod chains;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod scheduler;
pub mod sources;
pub mod web;


// Re-export commonly used types
pub use config::Config;
pub use controller::{DashboardState, DashboardView, EnergyMetricsController};
pub use error::{EnergyError, Result};
pub use metrics::DerivedViewModel;
pub use scheduler::RefreshTask;
