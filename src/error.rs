//! Error types for Fieldcast.

use thiserror::Error;

/// Library-level error type for Fieldcast operations.
#[derive(Error, Debug)]
pub enum FieldcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No recordings selected for mission {0}")]
    NoRecordingsSelected(String),

    #[error("No transcribed recordings available for mission {0}")]
    NoTranscribedRecordings(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Audio payload too large: {size} bytes (maximum {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Generation service unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Narration service unavailable: {0}")]
    NarrationUnavailable(String),

    #[error("Could not parse model output as JSON: {reason}. Output was: {raw}")]
    UnparseableModelOutput { reason: String, raw: String },

    #[error("Episode {0} has no script to narrate")]
    NoScript(String),

    #[error("Episode {0} has no audio and cannot be published")]
    MissingAudio(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for Fieldcast operations.
pub type Result<T> = std::result::Result<T, FieldcastError>;
