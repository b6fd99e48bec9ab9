use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TextGenerator;
use crate::infrastructure::llm::{AnthropicClient, OpenAiClient};
use crate::presentation::config::LlmProvider;

pub struct TextGeneratorFactory;

#[derive(Debug, thiserror::Error)]
pub enum TextGeneratorFactoryError {
    #[error("missing API key: {0} provider requires {1}")]
    MissingApiKey(LlmProvider, &'static str),
    #[error("client initialization failed: {0}")]
    InitializationFailed(String),
}

impl TextGeneratorFactory {
    pub fn create(
        provider: LlmProvider,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn TextGenerator>, TextGeneratorFactoryError> {
        let key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(TextGeneratorFactoryError::MissingApiKey(
                provider,
                provider.api_key_env(),
            ))?;

        match provider {
            LlmProvider::OpenAi => {
                tracing::info!(base_url = ?base_url, "Creating OpenAI text generator");
                let client = OpenAiClient::new(key, base_url, timeout)
                    .map_err(|e| TextGeneratorFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(client))
            }
            LlmProvider::Anthropic => {
                tracing::info!(base_url = ?base_url, "Creating Anthropic text generator");
                let client = AnthropicClient::new(key, base_url, timeout)
                    .map_err(|e| TextGeneratorFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(client))
            }
        }
    }
}
