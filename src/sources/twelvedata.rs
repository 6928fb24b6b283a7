//! TwelveData forex rate source
//!
//! Fetches the latest one-minute close for each configured currency pair
//! from TwelveData's time-series endpoint. Forex quotes carry no depth, so
//! the single close is replicated across all requested trade sizes. The API
//! key comes from the `TWELVEDATA_API_KEY` environment variable; without it
//! the source reports nothing.

use super::{RateQuote, RateSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// TwelveData REST API base URL
pub const TWELVEDATA_API_URL: &str = "https://api.twelvedata.com";

/// Configuration for the TwelveData source
#[derive(Debug, Clone, Deserialize)]
pub struct TwelveDataConfig {
    /// Whether this source is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Symbols to sample
    #[serde(default)]
    pub symbols: Vec<TwelveDataSymbol>,
}

/// Mapping from a canonical pair to its TwelveData symbol
#[derive(Debug, Clone, Deserialize)]
pub struct TwelveDataSymbol {
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// API symbol, slash-separated (e.g. "EUR/USD")
    pub api_symbol: String,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    TWELVEDATA_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: TWELVEDATA_API_URL.to_string(),
            timeout_secs: 10,
            symbols: vec![],
        }
    }
}

/// Time-series response envelope
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    values: Vec<SeriesValue>,
}

#[derive(Debug, Deserialize)]
struct SeriesValue {
    #[serde(default)]
    #[allow(dead_code)]
    datetime: String,
    close: String,
}

/// Forex quote source backed by TwelveData time series
pub struct TwelveDataSource {
    config: TwelveDataConfig,
    api_key: Option<String>,
    client: Client,
}

impl TwelveDataSource {
    /// Create a new TwelveData source. `api_key` is resolved by the caller.
    pub fn new(config: TwelveDataConfig, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            api_key,
            client,
        }
    }

    /// Fetch the latest close for one symbol
    async fn fetch_close(&self, api_key: &str, api_symbol: &str) -> anyhow::Result<Decimal> {
        let url = format!("{}/time_series", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", api_key),
                ("interval", "1min"),
                ("symbol", api_symbol),
                ("format", "JSON"),
                ("dp", "6"),
                ("outputsize", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("TwelveData error: {} - {}", status, body);
        }

        let series: TimeSeriesResponse = response.json().await?;
        parse_latest_close(&series)
    }
}

/// Extract and validate the most recent close of a response
fn parse_latest_close(series: &TimeSeriesResponse) -> anyhow::Result<Decimal> {
    if series.status == "error" {
        anyhow::bail!("TwelveData reported an error status");
    }

    let latest = series
        .values
        .first()
        .ok_or_else(|| anyhow::anyhow!("No data points in response"))?;

    Decimal::from_str(&latest.close)
        .map_err(|_| anyhow::anyhow!("Invalid close value: {}", latest.close))
}

#[async_trait]
impl RateSource for TwelveDataSource {
    fn name(&self) -> &'static str {
        "TwelveData"
    }

    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("TwelveData API key not found in environment");
            return Ok(vec![]);
        };

        let mut quotes = Vec::new();

        for symbol in &self.config.symbols {
            match self.fetch_close(api_key, &symbol.api_symbol).await {
                Ok(rate) => {
                    for &amount in amounts {
                        quotes.push(RateQuote {
                            id: Some(Uuid::new_v4()),
                            pair: symbol.pair.clone(),
                            amount,
                            rate,
                        });
                    }
                }
                Err(e) => {
                    tracing::error!(
                        pair = %symbol.pair,
                        api_symbol = %symbol.api_symbol,
                        error = %e,
                        "Failed to fetch time series"
                    );
                }
            }
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_latest_close() {
        let json = r#"{
            "meta": {"symbol": "EUR/USD", "interval": "1min"},
            "values": [
                {"datetime": "2024-01-01 00:00:00", "open": "1.0840",
                 "high": "1.0845", "low": "1.0838", "close": "1.084200"}
            ],
            "status": "ok"
        }"#;

        let series: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parse_latest_close(&series).unwrap(), dec!(1.084200));
    }

    #[test]
    fn test_parse_error_status() {
        let json = r#"{"status": "error", "values": []}"#;
        let series: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        assert!(parse_latest_close(&series).is_err());
    }

    #[test]
    fn test_parse_empty_values() {
        let json = r#"{"status": "ok", "values": []}"#;
        let series: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        assert!(parse_latest_close(&series).is_err());
    }

    #[test]
    fn test_parse_non_numeric_close() {
        let json = r#"{"status": "ok", "values": [{"datetime": "", "close": "NaN?"}]}"#;
        let series: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        assert!(parse_latest_close(&series).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_yields_no_quotes() {
        let source = TwelveDataSource::new(
            TwelveDataConfig {
                symbols: vec![TwelveDataSymbol {
                    pair: "EUR-USD".to_string(),
                    api_symbol: "EUR/USD".to_string(),
                }],
                ..TwelveDataConfig::default()
            },
            None,
        );

        let quotes = source.fetch_prices(&[dec!(1000)]).await.unwrap();
        assert!(quotes.is_empty());
    }
}
