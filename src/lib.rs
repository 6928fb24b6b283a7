//! rate-sampler: multi-venue exchange rate sampling pipeline
//!
//! This library provides the core components for:
//! - Depth-weighted effective rate computation over order book levels
//! - Rate source adapters for Binance, Uniswap, Pendulum, Vortex and TwelveData
//! - Concurrent batch aggregation with per-source failure isolation
//! - Continuous and one-shot scheduling with a hard wall-clock deadline
//! - Postgres persistence of normalized price ticks
//! - Structured logging and pipeline metrics

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod orderbook;
pub mod sources;
pub mod store;
pub mod telemetry;
