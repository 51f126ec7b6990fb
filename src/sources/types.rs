use serde::{Deserialize, Serialize};

/// Proof-of-work power draw estimate, in gigawatts, verbatim from the feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBitcoinStats {
    pub estimated: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Proof-of-stake power draw estimate, in kilowatts, verbatim from the feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawEthereumStats {
    pub guess_power: f64,
    pub min_power: f64,
    pub max_power: f64,
}

/// Both feeds wrap their payload as `{ "data": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
