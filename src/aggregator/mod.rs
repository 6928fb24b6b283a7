//! Batch aggregation
//!
//! Fans out one fetch per registered rate source, collects whatever comes
//! back, and finalizes the combined batch with one shared timestamp and
//! per-tick identifiers.

pub mod scheduler;

use crate::sources::RateSource;
use crate::telemetry;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A normalized price observation, finalized and ready for storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTick {
    /// Globally unique tick identifier
    pub id: Uuid,
    /// Batch timestamp, identical for every tick of one run
    pub timestamp: DateTime<Utc>,
    /// Originating provider label
    pub source: String,
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// Notional trade size the rate was computed for, in base units
    pub amount: Decimal,
    /// Quote units received per one base unit at this size
    pub rate: Decimal,
}

/// Runs the statically registered source set and produces one batch per call
pub struct Aggregator {
    sources: Vec<Arc<dyn RateSource>>,
    amounts: Arc<Vec<Decimal>>,
}

impl Aggregator {
    /// Create an aggregator over a fixed source set and trade size list
    pub fn new(sources: Vec<Arc<dyn RateSource>>, amounts: Vec<Decimal>) -> Self {
        Self {
            sources,
            amounts: Arc::new(amounts),
        }
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run one full sampling batch across every registered source.
    ///
    /// Each source runs on its own task. A failing or panicking source
    /// contributes zero ticks and never suppresses its siblings; a batch
    /// where every source came up empty is returned as an empty batch, not
    /// an error. All returned ticks share the timestamp captured here,
    /// before fan-out.
    pub async fn run_batch(&self) -> Vec<PriceTick> {
        let timestamp = Utc::now();

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let name = source.name();
                let source = Arc::clone(source);
                let amounts = Arc::clone(&self.amounts);
                let handle =
                    tokio::spawn(async move { source.fetch_prices(amounts.as_slice()).await });
                (name, handle)
            })
            .collect();

        let mut ticks = Vec::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(quotes)) => {
                    tracing::debug!(source = name, quotes = quotes.len(), "Source reported");
                    ticks.extend(quotes.into_iter().map(|quote| PriceTick {
                        id: quote.id.unwrap_or_else(Uuid::new_v4),
                        timestamp,
                        source: name.to_string(),
                        pair: quote.pair,
                        amount: quote.amount,
                        rate: quote.rate,
                    }));
                }
                Ok(Err(e)) => {
                    telemetry::metrics::record_source_failure(name);
                    tracing::error!(
                        source = name,
                        error = %e,
                        "Source failed, contributing zero ticks"
                    );
                }
                Err(e) => {
                    telemetry::metrics::record_source_failure(name);
                    tracing::error!(
                        source = name,
                        error = %e,
                        "Source task aborted, contributing zero ticks"
                    );
                }
            }
        }

        ticks
    }
}
