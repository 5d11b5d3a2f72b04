//! Picvote - Picture voting gallery CLI
//!
#![doc = "Picvote - Picture voting gallery CLI"]
#![doc = "Main entry point for the picvote client application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use picvote::cli::{Cli, Commands};
use picvote::commands;
use picvote::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Initialize metrics (no-op without the prometheus feature)
    picvote::metrics::init_metrics_exporter();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Watch => {
            tracing::info!("Starting interactive watch mode");
            commands::watch::run_watch(config).await?;
            Ok(())
        }
        Commands::Gallery { json } => {
            tracing::info!("Starting one-shot gallery listing");
            if json {
                tracing::debug!("Emitting JSON output");
            }
            commands::gallery::run_gallery(&config, json).await?;
            Ok(())
        }
        Commands::Stats { json } => {
            tracing::info!("Starting one-shot stats report");
            if json {
                tracing::debug!("Emitting JSON output");
            }
            commands::stats::run_stats(&config, json).await?;
            Ok(())
        }
        Commands::Vote { picture } => {
            tracing::info!("Starting one-shot vote for picture {}", picture);
            commands::vote::run_vote(&config, picture).await?;
            Ok(())
        }
        Commands::Session { action } => {
            tracing::info!("Starting session management command");
            commands::session::handle_session(&config, action)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("picvote=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
