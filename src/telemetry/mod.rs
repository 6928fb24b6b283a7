//! Telemetry module
//!
//! Structured logging and pipeline metrics

mod logging;
pub mod metrics;

pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_json)?;

    Ok(TelemetryGuard { _priv: () })
}
