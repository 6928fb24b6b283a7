//! Order book types and depth-weighted rate computation
//!
//! Used by rate sources that expose a raw level ladder instead of a single
//! executable price.

mod book;
mod depth;

pub use book::OrderBook;
pub use depth::effective_rate;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price level in an order book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLevel {
    /// Price at this level, in quote units per base unit
    pub price: Decimal,
    /// Total size available, in base units
    pub size: Decimal,
}
