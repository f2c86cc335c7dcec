//! Fieldcast CLI entry point.

use anyhow::Result;
use clap::Parser;
use fieldcast::cli::{commands, Cli, Commands};
use fieldcast::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("fieldcast={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Generate {
            mission_id,
            recording,
        } => {
            commands::run_generate(mission_id, recording, settings).await?;
        }

        Commands::Narrate { episode_id } => {
            commands::run_narrate(episode_id, settings).await?;
        }

        Commands::List { entity } => {
            commands::run_list(entity, settings).await?;
        }

        Commands::Stats => {
            commands::run_stats(settings).await?;
        }
    }

    Ok(())
}
