//! Fieldcast - Field Report Podcast Synthesis
//!
//! Field promoters answer missions with short voice reports from store
//! visits. Fieldcast transcribes those reports, lets an admin review them,
//! and compiles the approved ones into narrated podcast episodes.
//!
//! # Overview
//!
//! Fieldcast allows you to:
//! - Ingest promoter voice recordings and transcribe them
//! - Review recordings (approve/reject) and score guide adherence
//! - Compile a mission's recordings into a structured episode script
//! - Narrate episode scripts into audio and publish them
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `model` - Core entities (recordings, episodes, missions)
//! - `store` - SQLite persistence behind store traits
//! - `transcription` - Speech-to-text for voice reports
//! - `generation` - Chat-model prompting and output parsing
//! - `narration` - Text-to-speech for episode scripts
//! - `synthesis` - The episode generation pipeline
//! - `review` - Recording review workflow
//! - `analysis` - Guide-adherence scoring
//!
//! # Example
//!
//! ```rust,no_run
//! use fieldcast::config::Settings;
//! use fieldcast::synthesis::EpisodeSynthesizer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let synthesizer = EpisodeSynthesizer::new(&settings)?;
//!
//!     // Compile every approved recording of a mission into an episode
//!     let episode = synthesizer.generate_episode("mission-shelf", None).await?;
//!     println!("Generated: {}", episode.title);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod model;
pub mod narration;
pub mod openai;
pub mod review;
pub mod store;
pub mod synthesis;
pub mod transcription;

pub use error::{FieldcastError, Result};
