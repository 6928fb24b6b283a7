//! Tick persistence
//!
//! One flat `price_data` table. A batch either commits whole or the cycle
//! is reported failed; ticks are write-once and never updated.

mod postgres;

pub use postgres::PostgresStore;

use crate::aggregator::PriceTick;
use async_trait::async_trait;
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, transaction or statement failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable sink for finalized price ticks
#[async_trait]
pub trait TickStore: Send + Sync {
    /// Persist every tick of one batch atomically. An empty batch is a
    /// no-op, not an error.
    async fn store_batch(&self, ticks: &[PriceTick]) -> Result<(), StoreError>;
}
