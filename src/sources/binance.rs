//! Binance order book rate source
//!
//! Fetches one REST depth snapshot per configured pair and derives a
//! depth-weighted effective rate for every requested trade size by walking
//! the ask side of the book. One snapshot prices all sizes; amounts the
//! book cannot fill are skipped, not priced from a partial fill.

use super::{RateQuote, RateSource};
use crate::orderbook::{effective_rate, BookLevel, OrderBook};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Binance spot REST API base URL
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// Configuration for the Binance source
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    /// Whether this source is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Levels to request per side; deeper books fill larger sizes
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pairs to sample
    #[serde(default)]
    pub pairs: Vec<BinancePair>,
}

/// Mapping from a canonical pair to its Binance symbol
#[derive(Debug, Clone, Deserialize)]
pub struct BinancePair {
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// Spot symbol whose asks are priced in the pair's quote currency and
    /// sized in its base currency (e.g. "USDTBRL" for "USDT-BRL")
    pub symbol: String,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    BINANCE_API_URL.to_string()
}
fn default_depth_limit() -> u32 {
    500
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: BINANCE_API_URL.to_string(),
            depth_limit: 500,
            timeout_secs: 10,
            pairs: vec![],
        }
    }
}

/// Depth snapshot as returned by `GET /api/v3/depth`
#[derive(Debug, Deserialize)]
struct DepthSnapshot {
    #[serde(rename = "lastUpdateId")]
    #[allow(dead_code)]
    last_update_id: u64,
    #[serde(default)]
    bids: Vec<(String, String)>,
    #[serde(default)]
    asks: Vec<(String, String)>,
}

impl DepthSnapshot {
    fn into_book(self, symbol: &str) -> OrderBook {
        OrderBook {
            symbol: symbol.to_string(),
            bids: parse_levels(self.bids),
            asks: parse_levels(self.asks),
        }
    }
}

/// Parse raw string levels, dropping any that fail to parse
fn parse_levels(raw: Vec<(String, String)>) -> Vec<BookLevel> {
    raw.into_iter()
        .filter_map(|(price, size)| {
            let price = Decimal::from_str(&price).ok()?;
            let size = Decimal::from_str(&size).ok()?;
            Some(BookLevel { price, size })
        })
        .collect()
}

/// Order-book-based rate source backed by Binance spot depth snapshots
pub struct BinanceSource {
    config: BinanceConfig,
    client: Client,
}

impl BinanceSource {
    /// Create a new Binance source from configuration
    pub fn new(config: BinanceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch one depth snapshot for a symbol
    async fn fetch_depth(&self, symbol: &str) -> anyhow::Result<OrderBook> {
        let url = format!("{}/api/v3/depth", self.config.base_url);

        tracing::debug!(symbol = %symbol, "Fetching depth snapshot");

        let limit = self.config.depth_limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("limit", limit.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Binance depth error: {} - {}", status, body);
        }

        let snapshot: DepthSnapshot = response.json().await?;
        Ok(snapshot.into_book(symbol))
    }

    /// Derive one quote per amount from a single snapshot
    fn quotes_from_book(pair: &str, book: &OrderBook, amounts: &[Decimal]) -> Vec<RateQuote> {
        amounts
            .iter()
            .filter_map(|&amount| match effective_rate(&book.asks, amount) {
                Some(rate) => Some(RateQuote::new(pair, amount, rate)),
                None => {
                    tracing::warn!(
                        pair = %pair,
                        amount = %amount,
                        ask_depth = %book.ask_depth(),
                        "Ask depth cannot fill amount, skipping"
                    );
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl RateSource for BinanceSource {
    fn name(&self) -> &'static str {
        "Binance"
    }

    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>> {
        let mut quotes = Vec::new();

        for entry in &self.config.pairs {
            match self.fetch_depth(&entry.symbol).await {
                Ok(book) => {
                    quotes.extend(Self::quotes_from_book(&entry.pair, &book, amounts));
                }
                Err(e) => {
                    tracing::error!(
                        pair = %entry.pair,
                        symbol = %entry.symbol,
                        error = %e,
                        "Failed to fetch depth snapshot"
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

    fn fixture_book() -> OrderBook {
        let json = r#"{
            "lastUpdateId": 1027024,
            "bids": [["5.39", "800"], ["5.38", "1200"]],
            "asks": [["5.40", "600"], ["5.41", "500"], ["5.45", "100000"]]
        }"#;

        let snapshot: DepthSnapshot = serde_json::from_str(json).unwrap();
        snapshot.into_book("USDTBRL")
    }

    #[test]
    fn test_parse_depth_snapshot() {
        let book = fixture_book();
        assert_eq!(book.symbol, "USDTBRL");
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.asks.len(), 3);
        assert_eq!(book.best_ask(), Some(dec!(5.40)));
        assert_eq!(book.asks[0].size, dec!(600));
    }

    #[test]
    fn test_parse_levels_drops_invalid() {
        let levels = parse_levels(vec![
            ("5.40".to_string(), "600".to_string()),
            ("not_a_number".to_string(), "500".to_string()),
            ("5.41".to_string(), "bad".to_string()),
        ]);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].price, dec!(5.40));
    }

    #[test]
    fn test_quotes_from_book_one_per_amount() {
        let book = fixture_book();
        let amounts = [dec!(1000), dec!(10000)];

        let quotes = BinanceSource::quotes_from_book("USDT-BRL", &book, &amounts);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].pair, "USDT-BRL");
        assert_eq!(quotes[0].amount, dec!(1000));
        // 600 @ 5.40 + 400 @ 5.41 = 5404 over 1000 units
        assert_eq!(quotes[0].rate, dec!(5.404));
        assert!(quotes[1].rate > quotes[0].rate);
    }

    #[test]
    fn test_quotes_skip_unfillable_amounts() {
        let mut book = fixture_book();
        book.asks.truncate(2); // 1100 units of depth left

        let amounts = [dec!(1000), dec!(10000)];
        let quotes = BinanceSource::quotes_from_book("USDT-BRL", &book, &amounts);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].amount, dec!(1000));
    }

    #[test]
    fn test_empty_book_yields_no_quotes() {
        let book = OrderBook::new("USDTBRL");
        let quotes = BinanceSource::quotes_from_book("USDT-BRL", &book, &[dec!(1000)]);
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_binance_config_default() {
        let config = BinanceConfig::default();
        assert!(config.enabled);
        assert_eq!(config.base_url, BINANCE_API_URL);
        assert_eq!(config.depth_limit, 500);
    }
}
