//! OpenAI Whisper transcription implementation.

use super::{check_payload_size, filename_for, Transcriber};
use crate::config::{OpenAiSettings, TranscriptionSettings};
use crate::error::{FieldcastError, Result};
use crate::openai::create_client;
use async_openai::types::{AudioInput, AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber from settings.
    pub fn new(openai: &OpenAiSettings, transcription: &TranscriptionSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(openai)?,
            model: transcription.model.clone(),
        })
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self, audio), fields(bytes = audio.len(), content_type = %content_type))]
    async fn transcribe(
        &self,
        audio: &[u8],
        content_type: &str,
        language: &str,
    ) -> Result<String> {
        check_payload_size(audio)?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(
                filename_for(content_type).to_string(),
                audio.to_vec(),
            ))
            .model(&self.model)
            .language(language)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| FieldcastError::TranscriptionFailed(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| FieldcastError::TranscriptionFailed(format!("Whisper API error: {}", e)))?;

        let text = response.text.trim().to_string();
        if text.is_empty() {
            return Err(FieldcastError::TranscriptionFailed(
                "Whisper returned no text".to_string(),
            ));
        }

        debug!("Transcribed {} characters", text.len());
        Ok(text)
    }
}
