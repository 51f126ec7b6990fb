use crate::config::SourcesConfig;
use crate::error::{EnergyError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::sources::StatsSource;
use crate::sources::types::{DataEnvelope, RawBitcoinStats, RawEthereumStats};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

/// HTTP client for the Cambridge (CCAF) statistics endpoints
#[derive(Debug, Clone)]
pub struct CcafClient {
    http: reqwest::Client,
    bitcoin_url: String,
    ethereum_url: String,
    logger: StructuredLogger,
}

impl CcafClient {
    /// Build a client from the sources section of the configuration
    pub fn new(cfg: &SourcesConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .user_agent(format!("pos-energy/{}", env!("APP_VERSION")))
            .build()
            .map_err(|e| EnergyError::config(format!("Failed to build HTTP client: {}", e)))?;
        let logger = get_logger_with_context(
            LogContext::new("sources").with_field("provider", "ccaf".to_string()),
        );
        Ok(Self {
            http,
            bitcoin_url: cfg.bitcoin_url.clone(),
            ethereum_url: cfg.ethereum_url.clone(),
            logger,
        })
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.logger.debug(&format!("GET {}", url));
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnergyError::fetch_failed(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let envelope: DataEnvelope<T> = resp.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl StatsSource for CcafClient {
    async fn fetch_bitcoin(&self) -> Result<RawBitcoinStats> {
        let stats: RawBitcoinStats = self.get_data(&self.bitcoin_url).await?;
        self.logger.debug(&format!(
            "Bitcoin estimate {:.2} GW ({:.2}..{:.2})",
            stats.estimated, stats.lower_bound, stats.upper_bound
        ));
        Ok(stats)
    }

    async fn fetch_ethereum(&self) -> Result<RawEthereumStats> {
        let stats: RawEthereumStats = self.get_data(&self.ethereum_url).await?;
        self.logger.debug(&format!(
            "Ethereum estimate {:.1} kW ({:.1}..{:.1})",
            stats.guess_power, stats.min_power, stats.max_power
        ));
        Ok(stats)
    }
}
