use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::{GenerationRequest, ProviderError, TextGenerator};

/// Scripted generator that records every request it receives.
pub struct MockTextGenerator {
    response: String,
    failure: Option<ProviderError>,
    fail_when_prompt_contains: Option<String>,
    default_response_tokens: usize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new("Mock summary")
    }
}

impl MockTextGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            failure: None,
            fail_when_prompt_contains: None,
            default_response_tokens: 1000,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `error`.
    pub fn with_failure(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Calls whose user prompt contains `needle` fail with `error`.
    pub fn with_failure_when(mut self, needle: impl Into<String>, error: ProviderError) -> Self {
        self.failure = Some(error);
        self.fail_when_prompt_contains = Some(needle.into());
        self
    }

    pub fn with_default_response_tokens(mut self, tokens: usize) -> Self {
        self.default_response_tokens = tokens;
        self
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.recorded().clone()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<GenerationRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.recorded().push(request.clone());

        if let Some(error) = &self.failure {
            let triggered = match &self.fail_when_prompt_contains {
                Some(needle) => request.user_prompt.contains(needle.as_str()),
                None => true,
            };
            if triggered {
                return Err(error.clone());
            }
        }

        Ok(self.response.clone())
    }

    fn default_response_tokens(&self) -> usize {
        self.default_response_tokens
    }
}
