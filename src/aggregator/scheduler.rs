//! Cycle scheduling
//!
//! Two operating modes: a continuous loop that samples on a fixed interval,
//! and a one-shot mode with a hard wall-clock deadline for cron-style
//! invocation, where a hung provider must never leave the process alive
//! past its SLA.

use super::Aggregator;
use crate::store::{StoreError, TickStore};
use crate::telemetry;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Scheduling failures surfaced to the CLI layer
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The one-shot watchdog fired before the cycle finished
    #[error("sampling cycle exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),
    /// The sink rejected the batch; the cycle is reported failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run one sampling cycle: aggregate, then hand the batch to the store.
///
/// A batch where every source came up empty is still delivered; the store
/// treats it as a no-op. Returns the number of ticks stored.
pub async fn run_cycle(
    aggregator: &Aggregator,
    store: &dyn TickStore,
) -> Result<usize, ScheduleError> {
    let started = Instant::now();

    let ticks = aggregator.run_batch().await;
    store.store_batch(&ticks).await?;

    telemetry::metrics::record_cycle(started.elapsed(), ticks.len());
    tracing::info!(
        ticks = ticks.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Sampling cycle stored"
    );

    Ok(ticks.len())
}

/// Continuous mode: one cycle immediately, then one per interval, forever.
///
/// Cycles run back to back on one task and never overlap; a cycle that
/// outlasts the interval delays the next tick instead of queueing it. A
/// failed cycle is logged and the loop moves on to the next tick.
pub async fn run_continuous(
    aggregator: &Aggregator,
    store: &dyn TickStore,
    interval: Duration,
) -> ! {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Err(e) = run_cycle(aggregator, store).await {
            tracing::error!(error = %e, "Sampling cycle failed");
        }
    }
}

/// One-shot mode: a single cycle raced against a hard watchdog deadline.
///
/// The watchdog is canceled only by normal completion. On overrun the cycle
/// future is dropped, abandoning any in-flight provider calls rather than
/// unwinding them.
pub async fn run_once(
    aggregator: &Aggregator,
    store: &dyn TickStore,
    deadline: Duration,
) -> Result<usize, ScheduleError> {
    match tokio::time::timeout(deadline, run_cycle(aggregator, store)).await {
        Ok(result) => result,
        Err(_) => Err(ScheduleError::DeadlineExceeded(deadline)),
    }
}
