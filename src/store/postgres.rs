//! Postgres-backed tick store

use super::{StoreError, TickStore};
use crate::aggregator::PriceTick;
use async_trait::async_trait;
use sqlx::PgPool;

/// Stores ticks in a single flat `price_data` table
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect with sqlx's default pool settings
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `price_data` table if it does not exist
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS price_data (
                id UUID PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                source TEXT NOT NULL,
                currency_pair TEXT NOT NULL,
                amount NUMERIC NOT NULL,
                rate NUMERIC NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TickStore for PostgresStore {
    async fn store_batch(&self, ticks: &[PriceTick]) -> Result<(), StoreError> {
        if ticks.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for tick in ticks {
            sqlx::query(
                "INSERT INTO price_data (id, timestamp, source, currency_pair, amount, rate) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(tick.id)
            .bind(tick.timestamp)
            .bind(&tick.source)
            .bind(&tick.pair)
            .bind(tick.amount)
            .bind(tick.rate)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(rows = ticks.len(), "Committed batch to price_data");
        Ok(())
    }
}
