//! Text-to-speech narration.
//!
//! Voice and output format are configuration, not per-call parameters.

mod tts;

pub use tts::OpenAiNarrator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for narration (text-to-speech) services.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Synthesize speech for a script and return the audio bytes.
    async fn synthesize(&self, script: &str) -> Result<Vec<u8>>;
}
