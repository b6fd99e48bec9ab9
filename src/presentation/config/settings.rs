use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::application::services::{SummaryConfig, SummaryPolicy};
use crate::domain::{ContextWindowRule, ContextWindowTable};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub summary: SummarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    /// Environment variable consulted when no key is configured.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => f.write_str("openai"),
            LlmProvider::Anthropic => f.write_str("anthropic"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_response_tokens: Option<usize>,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.2,
            max_response_tokens: None,
            timeout_secs: 120,
        }
    }
}

impl LlmSettings {
    /// The configured key, else the provider's well-known variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(self.provider.api_key_env()).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    pub custom_prompt_path: Option<String>,
    pub custom_prompt_text: Option<String>,
    pub max_pdf_pages: Option<usize>,
    pub overlap_tokens: usize,
    pub chunk_response_tokens: usize,
    pub consolidation_budget_tokens: usize,
    pub overhead_tokens: usize,
    pub summarize_abstract_on_fallback: bool,
    pub context_windows: Vec<ContextWindowRule>,
}

impl Default for SummarySettings {
    fn default() -> Self {
        let policy = SummaryPolicy::default();
        Self {
            custom_prompt_path: None,
            custom_prompt_text: None,
            max_pdf_pages: None,
            overlap_tokens: policy.overlap_tokens,
            chunk_response_tokens: policy.chunk_response_tokens,
            consolidation_budget_tokens: policy.consolidation_budget_tokens,
            overhead_tokens: policy.overhead_tokens,
            summarize_abstract_on_fallback: policy.summarize_abstract_on_fallback,
            context_windows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub json: bool,
}

impl Settings {
    pub fn summary_policy(&self) -> SummaryPolicy {
        SummaryPolicy {
            overlap_tokens: self.summary.overlap_tokens,
            chunk_response_tokens: self.summary.chunk_response_tokens,
            consolidation_budget_tokens: self.summary.consolidation_budget_tokens,
            overhead_tokens: self.summary.overhead_tokens,
            summarize_abstract_on_fallback: self.summary.summarize_abstract_on_fallback,
            context_windows: ContextWindowTable::with_overrides(
                self.summary.context_windows.clone(),
            ),
            ..SummaryPolicy::default()
        }
    }

    pub fn summary_config(&self, custom_prompt_template: Option<String>) -> SummaryConfig {
        let mut config = SummaryConfig::new(self.llm.model.clone())
            .with_temperature(self.llm.temperature);
        config.max_response_tokens = self.llm.max_response_tokens;
        config.max_pdf_pages = self.summary.max_pdf_pages;
        config.custom_prompt_template = custom_prompt_template;
        config
    }
}
