//! Vortex ramp quote source
//!
//! Ramp quotes are size-dependent and keyed by (from, to, amount), so every
//! configured pair and amount is its own request; nothing can be amortized.

use super::{RateQuote, RateSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Vortex quote API base URL
pub const VORTEX_API_URL: &str = "https://api.vortexfinance.co";

/// Configuration for the Vortex source
#[derive(Debug, Clone, Deserialize)]
pub struct VortexConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub pairs: Vec<VortexPair>,
}

/// Mapping from a canonical pair to the ramp's (from, to) asset codes
#[derive(Debug, Clone, Deserialize)]
pub struct VortexPair {
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    pub from: String,
    pub to: String,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    VORTEX_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for VortexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: VORTEX_API_URL.to_string(),
            timeout_secs: 10,
            pairs: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RampQuote {
    /// Executable rate for the quoted amount, as a decimal string
    rate: String,
}

/// Fiat-ramp quote source
pub struct VortexSource {
    config: VortexConfig,
    client: Client,
}

impl VortexSource {
    pub fn new(config: VortexConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Request one executable quote for a specific amount
    async fn fetch_quote(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> anyhow::Result<Decimal> {
        let url = format!("{}/v1/quotes", self.config.base_url);

        let amount = amount.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("from", from), ("to", to), ("amount", amount.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Vortex quote error: {}", response.status());
        }

        let quote: RampQuote = response.json().await?;
        quote
            .rate
            .parse::<Decimal>()
            .map_err(|_| anyhow::anyhow!("Invalid rate value: {}", quote.rate))
    }
}

#[async_trait]
impl RateSource for VortexSource {
    fn name(&self) -> &'static str {
        "Vortex"
    }

    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>> {
        let mut quotes = Vec::new();

        for entry in &self.config.pairs {
            for &amount in amounts {
                match self.fetch_quote(&entry.from, &entry.to, amount).await {
                    Ok(rate) => quotes.push(RateQuote::new(&entry.pair, amount, rate)),
                    Err(e) => {
                        tracing::error!(
                            pair = %entry.pair,
                            amount = %amount,
                            error = %e,
                            "Failed to fetch ramp quote"
                        );
                    }
                }
            }
        }

        Ok(quotes)
    }
}
