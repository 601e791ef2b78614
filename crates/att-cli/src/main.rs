use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use att_cli::commands::{chart, clock, status, summary, watch};
use att_cli::{Cli, Commands, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let client = att_client::Client::new(&config.api_url, config.api_token.clone())
        .context("failed to build API client")?;
    let policy = config.policy();

    let mut stdout = std::io::stdout();
    match &cli.command {
        Some(Commands::Status) => status::run(&mut stdout, &client, &policy).await?,
        Some(Commands::Summary { json }) => summary::run(&mut stdout, &client, *json).await?,
        Some(Commands::Chart { month, json }) => {
            chart::run(&mut stdout, &client, *month, *json).await?;
        }
        Some(Commands::Clock { direction }) => {
            clock::run(&mut stdout, &client, (*direction).into()).await?;
        }
        Some(Commands::Watch) => watch::run(&mut stdout, &client).await?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
