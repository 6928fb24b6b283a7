//! Shared rate source types

use rust_decimal::Decimal;
use uuid::Uuid;

/// A single sampled rate from one provider, before batch finalization.
///
/// Quotes carry no timestamp: the aggregator stamps the whole batch with one
/// shared instant at fan-out. `id` is only set by adapters that mint their
/// own identifiers upstream; the aggregator fills in the rest.
#[derive(Debug, Clone)]
pub struct RateQuote {
    /// Adapter-supplied identifier, if any
    pub id: Option<Uuid>,
    /// Canonical pair label, "BASE-QUOTE"
    pub pair: String,
    /// Notional trade size the rate was computed for, in base units
    pub amount: Decimal,
    /// Quote units received per one base unit at this size
    pub rate: Decimal,
}

impl RateQuote {
    /// Create a quote without an upstream identifier
    pub fn new(pair: impl Into<String>, amount: Decimal, rate: Decimal) -> Self {
        Self {
            id: None,
            pair: pair.into(),
            amount,
            rate,
        }
    }
}
