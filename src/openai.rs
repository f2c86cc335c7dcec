//! OpenAI client construction from injected configuration.

use crate::config::OpenAiSettings;
use crate::error::{FieldcastError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client from settings.
///
/// The API key and endpoint come from configuration (with an environment
/// fallback resolved here, once); pipeline code never touches ambient state.
pub fn create_client(settings: &OpenAiSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = settings.resolve_api_key().ok_or_else(|| {
        FieldcastError::Config(
            "OpenAI API key not configured (set openai.api_key or OPENAI_API_KEY)".to_string(),
        )
    })?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = &settings.api_base {
        config = config.with_api_base(base);
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
