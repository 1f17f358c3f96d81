mod check;
mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::run::RunArgs;

#[derive(Debug, Parser)]
#[command(name = "fitwatch")]
#[command(about = "Scan fitness subreddits for keyword and competitor mentions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, match and deliver one report (the default)
    Run(RunArgs),
    /// Validate configuration and watchlist without touching the network
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Missing credentials abort here, before any network activity.
    let config = fitwatch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run(args)) => run::run_command(&config, &args).await,
        Some(Commands::CheckConfig) => check::check_config(&config),
        None => run::run_command(&config, &RunArgs::default()).await,
    }
}
