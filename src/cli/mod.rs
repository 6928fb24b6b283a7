//! CLI interface for rate-sampler
//!
//! Provides subcommands for:
//! - `run`: continuous sampling on a fixed interval
//! - `once`: one sampling cycle with a hard deadline
//! - `migrate`: create the price_data table
//! - `config`: show effective configuration

mod migrate;
mod once;
mod run;

pub use migrate::MigrateArgs;
pub use once::OnceArgs;
pub use run::RunArgs;

use crate::store::PostgresStore;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rate-sampler")]
#[command(about = "Samples executable exchange rates across venues and stores normalized ticks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample continuously on the configured interval
    Run(RunArgs),
    /// Run one sampling cycle with a hard deadline, then exit
    Once(OnceArgs),
    /// Create the price_data table
    Migrate(MigrateArgs),
    /// Show effective configuration
    Config,
}

/// Connect the Postgres store from `DATABASE_URL`
pub(crate) async fn connect_store() -> anyhow::Result<PostgresStore> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
    Ok(PostgresStore::connect(&url).await?)
}
