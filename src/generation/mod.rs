//! Generative text completion.
//!
//! The episode synthesizer and the adherence analyzer both talk to a chat
//! model through the [`TextGenerator`] trait; the OpenAI implementation is
//! the default.

pub mod parser;
pub mod prompts;

pub use parser::EpisodeDraft;

use crate::config::{GenerationSettings, OpenAiSettings};
use crate::error::{FieldcastError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Trait for generative text completion services.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt and return the raw model text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI chat-completions generator.
pub struct OpenAiGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    /// Create a new generator from settings.
    pub fn new(openai: &OpenAiSettings, generation: &GenerationSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(openai)?,
            model: generation.model.clone(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| FieldcastError::GenerationUnavailable(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| FieldcastError::GenerationUnavailable(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| FieldcastError::GenerationUnavailable(format!("Chat API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| {
                FieldcastError::GenerationUnavailable("Empty response from model".to_string())
            })?
            .clone();

        debug!("Model returned {} characters", content.len());
        Ok(content)
    }
}
