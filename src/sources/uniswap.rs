//! Uniswap pool rate source
//!
//! Reads V2-style pool reserves via JSON-RPC `eth_call` and prices each
//! requested trade size through the constant-product formula. Price impact
//! makes the rate amount-dependent, so one reserve read yields a distinct
//! quote per size.

use super::{RateQuote, RateSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// ABI selector for `getReserves()`
const GET_RESERVES_SELECTOR: &str = "0x0902f1ac";

/// Configuration for the Uniswap source
#[derive(Debug, Clone, Deserialize)]
pub struct UniswapConfig {
    /// Whether this source is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// JSON-RPC endpoint; `EVM_RPC_URL` overrides this when set
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pools to sample
    #[serde(default)]
    pub pools: Vec<UniswapPool>,
}

/// One pool mapped to a canonical pair.
///
/// Token ordering and decimals are explicit configuration: they are fixed
/// properties of the deployed pool and must never be inferred from a
/// response.
#[derive(Debug, Clone, Deserialize)]
pub struct UniswapPool {
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// Pool contract address
    pub address: String,
    /// Whether the pair's base currency is token0 of the pool
    pub base_is_token0: bool,
    /// ERC-20 decimals of the base token
    pub base_decimals: u32,
    /// ERC-20 decimals of the quote token
    pub quote_decimals: u32,
}

fn default_enabled() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for UniswapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rpc_url: None,
            timeout_secs: 10,
            pools: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Decode the first two 32-byte words of a `getReserves()` return blob
fn decode_reserves(data: &str) -> Option<(u128, u128)> {
    let hex = data.strip_prefix("0x")?;
    if hex.len() < 128 {
        return None;
    }
    let reserve0 = u128::from_str_radix(&hex[..64], 16).ok()?;
    let reserve1 = u128::from_str_radix(&hex[64..128], 16).ok()?;
    Some((reserve0, reserve1))
}

/// Price `amount` base units against the pool reserves.
///
/// Constant product with the 0.3% LP fee applied on the input side:
/// `out = in * 997 * R_out / (R_in * 1000 + in * 997)`. Returns `None` for
/// drained pools and for inputs that overflow the integer math.
fn quote_amount(pool: &UniswapPool, reserves: (u128, u128), amount: Decimal) -> Option<Decimal> {
    let (reserve0, reserve1) = reserves;
    let (reserve_in, reserve_out) = if pool.base_is_token0 {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };

    if reserve_in == 0 || reserve_out == 0 || amount <= Decimal::ZERO {
        return None;
    }

    let base_scale = Decimal::from(10u64.checked_pow(pool.base_decimals)?);
    let amount_in = (amount * base_scale).trunc().to_u128()?;
    if amount_in == 0 {
        return None;
    }

    let in_with_fee = amount_in.checked_mul(997)?;
    let numerator = in_with_fee.checked_mul(reserve_out)?;
    let denominator = reserve_in.checked_mul(1000)?.checked_add(in_with_fee)?;
    let amount_out = numerator / denominator;

    let out = Decimal::from_i128_with_scale(i128::try_from(amount_out).ok()?, pool.quote_decimals);
    Some(out / amount)
}

/// On-chain pool rate source backed by raw `eth_call` reserve reads
pub struct UniswapSource {
    config: UniswapConfig,
    rpc_url: Option<String>,
    client: Client,
}

impl UniswapSource {
    /// Create a new Uniswap source.
    ///
    /// `rpc_url` is the resolved endpoint (environment override already
    /// applied); `None` degrades the source to zero quotes.
    pub fn new(config: UniswapConfig, rpc_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            rpc_url,
            client,
        }
    }

    /// Read the current reserves of one pool
    async fn fetch_reserves(&self, rpc_url: &str, address: &str) -> anyhow::Result<(u128, u128)> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": address, "data": GET_RESERVES_SELECTOR }, "latest"],
        });

        let response = self.client.post(rpc_url).json(&body).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("RPC endpoint returned {}", response.status());
        }

        let rpc: RpcResponse = response.json().await?;

        if let Some(err) = rpc.error {
            anyhow::bail!("RPC error {}: {}", err.code, err.message);
        }

        let result = rpc
            .result
            .ok_or_else(|| anyhow::anyhow!("RPC response missing result"))?;

        decode_reserves(&result)
            .ok_or_else(|| anyhow::anyhow!("Malformed getReserves return data: {}", result))
    }
}

#[async_trait]
impl RateSource for UniswapSource {
    fn name(&self) -> &'static str {
        "Uniswap"
    }

    async fn fetch_prices(&self, amounts: &[Decimal]) -> anyhow::Result<Vec<RateQuote>> {
        let Some(rpc_url) = self.rpc_url.as_deref() else {
            tracing::error!("No RPC endpoint configured, Uniswap contributes no quotes");
            return Ok(vec![]);
        };

        let mut quotes = Vec::new();

        for pool in &self.config.pools {
            let reserves = match self.fetch_reserves(rpc_url, &pool.address).await {
                Ok(reserves) => reserves,
                Err(e) => {
                    tracing::error!(
                        pair = %pool.pair,
                        address = %pool.address,
                        error = %e,
                        "Failed to read pool reserves"
                    );
                    continue;
                }
            };

            for &amount in amounts {
                match quote_amount(pool, reserves, amount) {
                    Some(rate) => quotes.push(RateQuote::new(&pool.pair, amount, rate)),
                    None => {
                        tracing::warn!(
                            pair = %pool.pair,
                            amount = %amount,
                            "Pool cannot price amount, skipping"
                        );
                    }
                }
            }
        }

        Ok(quotes)
    }
}
