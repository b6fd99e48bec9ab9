use async_trait::async_trait;

/// A single request to a chat-style text generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_response_tokens: usize,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Response budget used when the caller does not configure one.
    fn default_response_tokens(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("provider misconfigured: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Raw backend message without the variant prefix.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::QuotaExceeded(msg)
            | Self::RateLimited(msg)
            | Self::Authentication(msg)
            | Self::ApiRequestFailed(msg)
            | Self::InvalidResponse(msg)
            | Self::Configuration(msg) => msg.clone(),
            Self::Timeout(_) => self.to_string(),
        }
    }
}
