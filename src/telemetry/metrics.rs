//! Pipeline metrics

use std::time::Duration;

/// Record the outcome of one sampling cycle
pub fn record_cycle(elapsed: Duration, tick_count: usize) {
    metrics::counter!("ratesampler_cycles_total").increment(1);
    metrics::histogram!("ratesampler_cycle_duration_ms").record(elapsed.as_millis() as f64);
    metrics::histogram!("ratesampler_batch_ticks").record(tick_count as f64);
}

/// Record a source that contributed zero ticks because it failed
pub fn record_source_failure(source: &'static str) {
    metrics::counter!("ratesampler_source_failures_total", "source" => source).increment(1);
}
