//! Rate source adapters
//!
//! One adapter per quote provider. Every adapter translates provider-native
//! data into normalized [`RateQuote`]s for the configured trade sizes and
//! absorbs its own failures so that siblings keep reporting.

mod binance;
mod pendulum;
mod twelvedata;
mod types;
mod uniswap;
mod vortex;

pub use binance::{BinanceConfig, BinancePair, BinanceSource};
pub use pendulum::{PendulumConfig, PendulumFeed, PendulumSource};
pub use twelvedata::{TwelveDataConfig, TwelveDataSource, TwelveDataSymbol};
pub use types::RateQuote;
pub use uniswap::{UniswapConfig, UniswapPool, UniswapSource};
pub use vortex::{VortexConfig, VortexPair, VortexSource};

use crate::config::Config;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Trait for rate source implementations
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Stable provider label stored on every tick from this source
    fn name(&self) -> &'static str;

    /// Sample one rate per configured pair per requested trade size.
    ///
    /// Transport failures, malformed responses and absent credentials are
    /// handled inside the adapter and degrade to fewer quotes, down to an
    /// empty vector. An `Err` here is a contract violation; the aggregator
    /// logs it and treats the source as having reported nothing.
    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>>;
}

/// Build the statically registered source set from configuration.
///
/// Optional credentials are read from the environment here, once, so that
/// adapters stay constructible in tests without any environment at all.
pub fn build_sources(config: &Config) -> Vec<Arc<dyn RateSource>> {
    let mut sources: Vec<Arc<dyn RateSource>> = Vec::new();

    if config.sources.binance.enabled {
        sources.push(Arc::new(BinanceSource::new(config.sources.binance.clone())));
    }

    if config.sources.uniswap.enabled {
        let rpc_url = std::env::var("EVM_RPC_URL")
            .ok()
            .or_else(|| config.sources.uniswap.rpc_url.clone());
        sources.push(Arc::new(UniswapSource::new(
            config.sources.uniswap.clone(),
            rpc_url,
        )));
    }

    if config.sources.pendulum.enabled {
        sources.push(Arc::new(PendulumSource::new(
            config.sources.pendulum.clone(),
        )));
    }

    if config.sources.twelvedata.enabled {
        let api_key = std::env::var("TWELVEDATA_API_KEY").ok();
        sources.push(Arc::new(TwelveDataSource::new(
            config.sources.twelvedata.clone(),
            api_key,
        )));
    }

    if config.sources.vortex.enabled {
        sources.push(Arc::new(VortexSource::new(config.sources.vortex.clone())));
    }

    sources
}
