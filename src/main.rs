use clap::Parser;
use rate_sampler::cli::{Cli, Commands};
use rate_sampler::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Provider credentials and DATABASE_URL may come from a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = rate_sampler::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting continuous sampling");
            args.execute(&config).await?;
        }
        Commands::Once(args) => {
            tracing::info!("Starting one-shot sampling cycle");
            args.execute(&config).await?;
        }
        Commands::Migrate(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Amounts: {:?}", config.sampling.amounts);
            println!("  Interval: {}s", config.scheduler.interval_secs);
            println!(
                "  One-shot deadline: {}s",
                config.scheduler.once_deadline_secs
            );
            println!("  Sources:");
            println!("    Binance:    {}", config.sources.binance.enabled);
            println!("    Uniswap:    {}", config.sources.uniswap.enabled);
            println!("    Pendulum:   {}", config.sources.pendulum.enabled);
            println!("    TwelveData: {}", config.sources.twelvedata.enabled);
            println!("    Vortex:     {}", config.sources.vortex.enabled);
        }
    }

    Ok(())
}
