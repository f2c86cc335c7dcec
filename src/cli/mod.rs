//! CLI module for Fieldcast.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Fieldcast - Field Report Podcast Synthesis
///
/// Reviews promoter voice reports and compiles them into narrated podcast
/// episodes, one mission at a time.
#[derive(Parser, Debug)]
#[command(name = "fieldcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Fieldcast: config file, data directory, sample missions
    Init,

    /// Start the HTTP API server for dashboards and capture clients
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Generate a podcast episode from a mission's recordings
    Generate {
        /// Mission to compile
        mission_id: String,

        /// Restrict to specific recording ids (default: all approved/transcribed)
        #[arg(short, long)]
        recording: Vec<String>,
    },

    /// Narrate a generated episode's script into audio
    Narrate {
        /// Episode to narrate
        episode_id: String,
    },

    /// List stored entities
    List {
        /// What to list (recordings, episodes, missions)
        #[arg(default_value = "recordings")]
        entity: String,
    },

    /// Show aggregate pipeline counts
    Stats,
}
