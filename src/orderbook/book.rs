//! Order book snapshot state

use super::BookLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// L2 aggregated order book snapshot for one traded symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    /// Provider-native symbol the snapshot was taken for
    pub symbol: String,
    /// Bid levels, sorted best (highest) to worst
    pub bids: Vec<BookLevel>,
    /// Ask levels, sorted best (lowest) to worst
    pub asks: Vec<BookLevel>,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: vec![],
            asks: vec![],
        }
    }

    /// Get best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Get best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Total size resting on the ask side
    pub fn ask_depth(&self) -> Decimal {
        self.asks.iter().map(|l| l.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_book_new() {
        let book = OrderBook::new("USDTBRL");
        assert_eq!(book.symbol, "USDTBRL");
        assert!(book.bids.is_empty());
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_order_book_best_bid() {
        let mut book = OrderBook::new("USDTBRL");
        assert!(book.best_bid().is_none());

        book.bids = vec![
            BookLevel {
                price: dec!(5.39),
                size: dec!(100),
            },
            BookLevel {
                price: dec!(5.38),
                size: dec!(100),
            },
        ];
        assert_eq!(book.best_bid(), Some(dec!(5.39)));
    }

    #[test]
    fn test_order_book_best_ask() {
        let mut book = OrderBook::new("USDTBRL");
        assert!(book.best_ask().is_none());

        book.asks = vec![
            BookLevel {
                price: dec!(5.40),
                size: dec!(100),
            },
            BookLevel {
                price: dec!(5.41),
                size: dec!(100),
            },
        ];
        assert_eq!(book.best_ask(), Some(dec!(5.40)));
    }

    #[test]
    fn test_ask_depth() {
        let mut book = OrderBook::new("USDTBRL");
        assert_eq!(book.ask_depth(), Decimal::ZERO);

        book.asks = vec![
            BookLevel {
                price: dec!(5.40),
                size: dec!(600),
            },
            BookLevel {
                price: dec!(5.41),
                size: dec!(500),
            },
        ];
        assert_eq!(book.ask_depth(), dec!(1100));
    }
}
