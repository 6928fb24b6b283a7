//! Configuration types for rate-sampler

use crate::sources::{
    BinanceConfig, PendulumConfig, TwelveDataConfig, UniswapConfig, VortexConfig,
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Trade sizes sampled on every cycle
#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// Notional base amounts every source is asked to price
    #[serde(default = "default_amounts")]
    pub amounts: Vec<Decimal>,
}

/// Cycle scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between continuous-mode cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Hard wall-clock deadline for one-shot mode, in seconds
    #[serde(default = "default_deadline_secs")]
    pub once_deadline_secs: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines for aggregation
    #[serde(default)]
    pub log_json: bool,
}

/// Per-provider source configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub binance: BinanceConfig,
    #[serde(default)]
    pub uniswap: UniswapConfig,
    #[serde(default)]
    pub pendulum: PendulumConfig,
    #[serde(default)]
    pub twelvedata: TwelveDataConfig,
    #[serde(default)]
    pub vortex: VortexConfig,
}

fn default_amounts() -> Vec<Decimal> {
    vec![
        Decimal::from(1_000),
        Decimal::from(10_000),
        Decimal::from(50_000),
        Decimal::from(100_000),
    ]
}
fn default_interval_secs() -> u64 {
    1800
}
fn default_deadline_secs() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            amounts: default_amounts(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            once_deadline_secs: default_deadline_secs(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [sampling]
            amounts = [1000, 10000, 50000, 100000]

            [scheduler]
            interval_secs = 1800
            once_deadline_secs = 60

            [telemetry]
            log_level = "debug"
            log_json = true

            [sources.binance]
            enabled = true
            depth_limit = 1000
            pairs = [{ pair = "USDT-BRL", symbol = "USDTBRL" }]

            [sources.uniswap]
            enabled = false

            [sources.twelvedata]
            symbols = [
                { pair = "EUR-USD", api_symbol = "EUR/USD" },
                { pair = "USD-BRL", api_symbol = "USD/BRL" },
            ]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sampling.amounts.len(), 4);
        assert_eq!(config.sampling.amounts[0], dec!(1000));
        assert_eq!(config.scheduler.interval_secs, 1800);
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.telemetry.log_json);
        assert_eq!(config.sources.binance.depth_limit, 1000);
        assert_eq!(config.sources.binance.pairs[0].symbol, "USDTBRL");
        assert!(!config.sources.uniswap.enabled);
        assert_eq!(config.sources.twelvedata.symbols.len(), 2);
    }

    #[test]
    fn test_config_defaults_for_missing_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sampling.amounts, vec![
            dec!(1000),
            dec!(10000),
            dec!(50000),
            dec!(100000)
        ]);
        assert_eq!(config.scheduler.interval_secs, 1800);
        assert_eq!(config.scheduler.once_deadline_secs, 60);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.sources.binance.enabled);
        assert!(config.sources.binance.pairs.is_empty());
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
        assert!(config.sources.binance.enabled);
        assert!(!config.sources.binance.pairs.is_empty());
        assert!(!config.sources.twelvedata.symbols.is_empty());
    }
}
