//! Pendulum oracle rate source
//!
//! Reads the prices published on-chain by Pendulum's oracle pallet through
//! the chain's price-feed gateway, which exposes the current oracle state
//! as (symbol, price, timestamp) tuples. One gateway read covers every
//! configured pair, and the single oracle rate is replicated across all
//! requested trade sizes.

use super::{RateQuote, RateSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Pendulum price-feed gateway base URL
pub const PENDULUM_GATEWAY_URL: &str = "https://oracle.pendulumchain.tech";

/// Configuration for the Pendulum source
#[derive(Debug, Clone, Deserialize)]
pub struct PendulumConfig {
    /// Whether this source is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Gateway base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Oracle feeds to sample
    #[serde(default)]
    pub feeds: Vec<PendulumFeed>,
}

/// Mapping from a canonical pair to its oracle symbol
#[derive(Debug, Clone, Deserialize)]
pub struct PendulumFeed {
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// Symbol the oracle publishes this pair under
    pub symbol: String,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    PENDULUM_GATEWAY_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: PENDULUM_GATEWAY_URL.to_string(),
            timeout_secs: 10,
            feeds: vec![],
        }
    }
}

/// One published oracle tuple
#[derive(Debug, Deserialize)]
struct OracleFeed {
    symbol: String,
    price: String,
    #[serde(default)]
    #[allow(dead_code)]
    timestamp: i64,
}

/// Oracle-backed rate source
pub struct PendulumSource {
    config: PendulumConfig,
    client: Client,
}

impl PendulumSource {
    /// Create a new Pendulum source from configuration
    pub fn new(config: PendulumConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch the full published feed set
    async fn fetch_feeds(&self) -> anyhow::Result<Vec<OracleFeed>> {
        let url = format!("{}/price-feeds", self.config.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Oracle gateway returned {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Match configured feeds against published tuples
    fn quotes_from_feeds(
        config: &PendulumConfig,
        feeds: &[OracleFeed],
        amounts: &[Decimal],
    ) -> Vec<RateQuote> {
        let mut quotes = Vec::new();

        for entry in &config.feeds {
            let Some(feed) = feeds.iter().find(|f| f.symbol == entry.symbol) else {
                tracing::warn!(
                    pair = %entry.pair,
                    symbol = %entry.symbol,
                    "Oracle did not publish symbol this cycle"
                );
                continue;
            };

            let rate = match Decimal::from_str(&feed.price) {
                Ok(rate) => rate,
                Err(e) => {
                    tracing::error!(
                        pair = %entry.pair,
                        price = %feed.price,
                        error = %e,
                        "Oracle published unparseable price"
                    );
                    continue;
                }
            };

            for &amount in amounts {
                quotes.push(RateQuote::new(&entry.pair, amount, rate));
            }
        }

        quotes
    }
}

#[async_trait]
impl RateSource for PendulumSource {
    fn name(&self) -> &'static str {
        "Pendulum"
    }

    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>> {
        let feeds = match self.fetch_feeds().await {
            Ok(feeds) => feeds,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read oracle feeds");
                return Ok(vec![]);
            }
        };

        Ok(Self::quotes_from_feeds(&self.config, &feeds, amounts))
    }
}
