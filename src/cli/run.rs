//! Continuous sampling command

use crate::aggregator::{scheduler, Aggregator};
use crate::config::Config;
use crate::sources;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the configured cycle interval, in seconds
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = super::connect_store().await?;

        let sources = sources::build_sources(config);
        anyhow::ensure!(!sources.is_empty(), "No sources enabled in configuration");

        let aggregator = Aggregator::new(sources, config.sampling.amounts.clone());
        let interval = Duration::from_secs(
            self.interval_secs.unwrap_or(config.scheduler.interval_secs),
        );

        tracing::info!(
            sources = aggregator.source_count(),
            interval_secs = interval.as_secs(),
            "Sampling on a fixed interval"
        );

        scheduler::run_continuous(&aggregator, &store, interval).await
    }
}
