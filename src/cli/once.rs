//! One-shot sampling command

use crate::aggregator::scheduler::{self, ScheduleError};
use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::sources;
use clap::Args;
use std::time::Duration;

/// Exit status for a cycle that overran its hard deadline, distinct from
/// generic failure so operational tooling can tell the two apart
const EXIT_DEADLINE_EXCEEDED: i32 = 2;

#[derive(Args, Debug)]
pub struct OnceArgs {
    /// Override the configured hard deadline, in seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

impl OnceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = super::connect_store().await?;

        let sources = sources::build_sources(config);
        anyhow::ensure!(!sources.is_empty(), "No sources enabled in configuration");

        let aggregator = Aggregator::new(sources, config.sampling.amounts.clone());
        let deadline = Duration::from_secs(
            self.deadline_secs
                .unwrap_or(config.scheduler.once_deadline_secs),
        );

        match scheduler::run_once(&aggregator, &store, deadline).await {
            Ok(ticks) => {
                tracing::info!(ticks, "One-shot cycle complete");
                Ok(())
            }
            Err(ScheduleError::DeadlineExceeded(d)) => {
                tracing::error!(
                    deadline_secs = d.as_secs(),
                    "Cycle overran its hard deadline, forcing exit"
                );
                std::process::exit(EXIT_DEADLINE_EXCEEDED);
            }
            Err(e) => Err(e.into()),
        }
    }
}
