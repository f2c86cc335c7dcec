//! OpenAI TTS narrator implementation.

use super::Narrator;
use crate::config::{NarrationSettings, OpenAiSettings};
use crate::error::{FieldcastError, Result};
use crate::openai::create_client;
use async_openai::types::{
    CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI text-to-speech narrator.
pub struct OpenAiNarrator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
    format: SpeechResponseFormat,
}

impl OpenAiNarrator {
    /// Create a new narrator from settings.
    pub fn new(openai: &OpenAiSettings, narration: &NarrationSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(openai)?,
            model: parse_model(&narration.model),
            voice: parse_voice(&narration.voice)?,
            format: parse_format(&narration.format)?,
        })
    }
}

fn parse_model(model: &str) -> SpeechModel {
    match model {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

fn parse_voice(voice: &str) -> Result<Voice> {
    match voice.to_lowercase().as_str() {
        "alloy" => Ok(Voice::Alloy),
        "echo" => Ok(Voice::Echo),
        "fable" => Ok(Voice::Fable),
        "onyx" => Ok(Voice::Onyx),
        "nova" => Ok(Voice::Nova),
        "shimmer" => Ok(Voice::Shimmer),
        other => Err(FieldcastError::Config(format!(
            "Unknown narration voice: {}",
            other
        ))),
    }
}

fn parse_format(format: &str) -> Result<SpeechResponseFormat> {
    match format.to_lowercase().as_str() {
        "mp3" => Ok(SpeechResponseFormat::Mp3),
        "opus" => Ok(SpeechResponseFormat::Opus),
        "aac" => Ok(SpeechResponseFormat::Aac),
        "flac" => Ok(SpeechResponseFormat::Flac),
        "wav" => Ok(SpeechResponseFormat::Wav),
        other => Err(FieldcastError::Config(format!(
            "Unknown narration format: {}",
            other
        ))),
    }
}

#[async_trait]
impl Narrator for OpenAiNarrator {
    #[instrument(skip(self, script), fields(script_len = script.len()))]
    async fn synthesize(&self, script: &str) -> Result<Vec<u8>> {
        let request = CreateSpeechRequestArgs::default()
            .model(self.model.clone())
            .voice(self.voice.clone())
            .input(script.to_string())
            .response_format(self.format.clone())
            .build()
            .map_err(|e| FieldcastError::NarrationUnavailable(e.to_string()))?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| FieldcastError::NarrationUnavailable(format!("TTS API error: {}", e)))?;

        debug!("Narration produced {} bytes", response.bytes.len());
        Ok(response.bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice() {
        assert!(matches!(parse_voice("Onyx").unwrap(), Voice::Onyx));
        assert!(parse_voice("baritone").is_err());
    }

    #[test]
    fn test_parse_format() {
        assert!(matches!(parse_format("mp3").unwrap(), SpeechResponseFormat::Mp3));
        assert!(parse_format("midi").is_err());
    }
}
