use std::path::Path;
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::ports::{DocumentExtractor, GenerationRequest, ProviderError, TextGenerator};
use crate::application::services::chunker::TokenChunker;
use crate::application::services::prompt_builder::{
    CONSOLIDATION_SYSTEM_PROMPT, DEFAULT_PROMPT_TEMPLATE, PromptFrame, SYSTEM_PROMPT,
    abstract_prompt, combine_part_summaries, consolidation_prompt, fallback_body, format_summary,
};
use crate::application::services::token_estimator::{TokenizerProfile, heuristic_tokens};
use crate::domain::{
    ContextWindowTable, DocumentMetadata, Summary, SummaryError, SummaryErrorKind, SummaryPath,
    SummaryResult,
};

pub const OMISSION_MARKER: &str = "[omitted for length]";
const HEAD_SHARE: f64 = 0.6;
const MAX_TRUNCATION_ROUNDS: usize = 8;

/// Per-run settings supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    pub model: String,
    pub temperature: f32,
    /// Falls back to the generator's own default when unset.
    pub max_response_tokens: Option<usize>,
    pub custom_prompt_template: Option<String>,
    pub max_pdf_pages: Option<usize>,
}

impl SummaryConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.2,
            max_response_tokens: None,
            custom_prompt_template: None,
            max_pdf_pages: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_response_tokens(mut self, tokens: usize) -> Self {
        self.max_response_tokens = Some(tokens);
        self
    }

    pub fn with_custom_prompt(mut self, template: impl Into<String>) -> Self {
        self.custom_prompt_template = Some(template.into());
        self
    }

    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pdf_pages = Some(pages);
        self
    }
}

/// Budgeting constants that stay fixed across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPolicy {
    pub overlap_tokens: usize,
    pub chunk_response_tokens: usize,
    pub consolidation_budget_tokens: usize,
    pub overhead_tokens: usize,
    pub summarize_abstract_on_fallback: bool,
    pub fallback_response_tokens: usize,
    pub context_windows: ContextWindowTable,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            overlap_tokens: 200,
            chunk_response_tokens: 1000,
            consolidation_budget_tokens: 12000,
            overhead_tokens: 100,
            summarize_abstract_on_fallback: true,
            fallback_response_tokens: 500,
            context_windows: ContextWindowTable::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub context_window: usize,
    pub system_tokens: usize,
    pub prefix_tokens: usize,
    pub reserved_tokens: usize,
    pub max_chunk_tokens: usize,
}

pub struct SummarizationService<E: ?Sized, G: ?Sized>
where
    E: DocumentExtractor,
    G: TextGenerator,
{
    extractor: Arc<E>,
    generator: Arc<G>,
    policy: SummaryPolicy,
}

impl<E: ?Sized, G: ?Sized> SummarizationService<E, G>
where
    E: DocumentExtractor,
    G: TextGenerator,
{
    pub fn new(extractor: Arc<E>, generator: Arc<G>, policy: SummaryPolicy) -> Self {
        Self {
            extractor,
            generator,
            policy,
        }
    }

    pub fn policy(&self) -> &SummaryPolicy {
        &self.policy
    }

    pub async fn summarize(
        &self,
        path: &Path,
        metadata: &DocumentMetadata,
        config: &SummaryConfig,
    ) -> SummaryResult {
        let span = tracing::info_span!(
            "summarize",
            run_id = %Uuid::new_v4(),
            path = %path.display(),
            model = %config.model,
        );

        let result = self.run(path, metadata, config).instrument(span.clone()).await;
        span.in_scope(|| match &result {
            Ok(summary) => tracing::info!(path = ?summary.path, "Summary complete"),
            Err(e) => tracing::error!(kind = %e.kind, message = %e.message, "Summary failed"),
        });
        result.into()
    }

    /// Token arithmetic for a run, before any document text is considered.
    pub fn budget_for(&self, metadata: &DocumentMetadata, config: &SummaryConfig) -> TokenBudget {
        let template = template_for(config);
        let profile = TokenizerProfile::for_model(&config.model);
        let frame = PromptFrame::new(template, metadata);

        let context_window = self.policy.context_windows.lookup(&config.model);
        let system_tokens = profile.count(SYSTEM_PROMPT);
        let prefix_tokens = profile.count(&frame.prefix());
        let reserved_tokens = config
            .max_response_tokens
            .unwrap_or_else(|| self.generator.default_response_tokens());
        let max_chunk_tokens = context_window.saturating_sub(
            system_tokens + prefix_tokens + reserved_tokens + self.policy.overhead_tokens,
        );

        TokenBudget {
            context_window,
            system_tokens,
            prefix_tokens,
            reserved_tokens,
            max_chunk_tokens,
        }
    }

    async fn run(
        &self,
        path: &Path,
        metadata: &DocumentMetadata,
        config: &SummaryConfig,
    ) -> Result<Summary, SummaryError> {
        let extracted = self
            .extractor
            .extract(path, config.max_pdf_pages)
            .await
            .map_err(|e| SummaryError::extraction_failed(e.to_string()))?;

        if extracted.is_blank() {
            return Err(SummaryError::extraction_failed(
                "no text could be extracted from the document",
            ));
        }

        tracing::info!(
            pages = extracted.pages_read(),
            chars = extracted.as_str().len(),
            "Text extracted"
        );

        let profile = TokenizerProfile::for_model(&config.model);
        let budget = self.budget_for(metadata, config);
        tracing::debug!(
            context_window = budget.context_window,
            system_tokens = budget.system_tokens,
            prefix_tokens = budget.prefix_tokens,
            reserved_tokens = budget.reserved_tokens,
            max_chunk_tokens = budget.max_chunk_tokens,
            exact = profile.is_exact(),
            "Token budget planned"
        );
        if budget.max_chunk_tokens == 0 {
            tracing::warn!(
                context_window = budget.context_window,
                "Prompt and response budget exceed the context window"
            );
        }

        let text = extracted.into_string();
        let frame = PromptFrame::new(template_for(config), metadata);

        if fits_budget(profile, &text, budget.max_chunk_tokens) {
            tracing::info!("Document fits in one request, using single pass");
            let request = self.request(config, SYSTEM_PROMPT, frame.single_pass(&text), budget.reserved_tokens);
            drop(text);
            let body = self
                .generator
                .generate(&request)
                .await
                .map_err(map_provider_error)?;
            return Ok(Summary::new(
                format_summary(metadata, &body),
                SummaryPath::SinglePass,
            ));
        }

        self.summarize_in_chunks(text, profile, budget, &frame, metadata, config)
            .await
    }

    async fn summarize_in_chunks(
        &self,
        text: String,
        profile: TokenizerProfile,
        budget: TokenBudget,
        frame: &PromptFrame<'_>,
        metadata: &DocumentMetadata,
        config: &SummaryConfig,
    ) -> Result<Summary, SummaryError> {
        let chunker = TokenChunker::new(profile, budget.max_chunk_tokens, self.policy.overlap_tokens);
        let chunks = tokio::task::spawn_blocking(move || chunker.chunk(text))
            .await
            .map_err(|e| SummaryError::general(format!("chunking task failed: {}", e)))?;

        let total_chunks = chunks.len();
        tracing::info!(chunks = total_chunks, "Document split for chunked summarization");
        if total_chunks == 0 {
            return Ok(self.fallback(metadata, config).await);
        }

        let mut parts = Vec::with_capacity(total_chunks);
        for chunk in chunks {
            let request = self.request(
                config,
                SYSTEM_PROMPT,
                frame.for_chunk(&chunk),
                self.policy.chunk_response_tokens,
            );
            let ordinal = chunk.ordinal();
            drop(chunk);

            match self.generator.generate(&request).await {
                Ok(summary) if !summary.trim().is_empty() => parts.push((ordinal, summary)),
                Ok(_) => tracing::warn!(part = ordinal, "Chunk summary was empty, skipping"),
                Err(e) => tracing::warn!(part = ordinal, error = %e, "Chunk summary failed, skipping"),
            }
        }

        if parts.is_empty() {
            tracing::warn!(chunks = total_chunks, "Every chunk failed, building fallback summary");
            return Ok(self.fallback(metadata, config).await);
        }

        let summarized_chunks = parts.len();
        let combined = combine_part_summaries(&parts, total_chunks);
        drop(parts);

        let consolidation_budget = if budget.max_chunk_tokens > 0 {
            self.policy
                .consolidation_budget_tokens
                .min(budget.max_chunk_tokens)
        } else {
            self.policy.consolidation_budget_tokens
        };
        let (combined, truncated) = truncate_middle(&combined, profile, consolidation_budget)?;
        if truncated {
            tracing::warn!(
                budget = consolidation_budget,
                "Combined part summaries exceed consolidation budget, middle omitted"
            );
        }

        let request = self.request(
            config,
            CONSOLIDATION_SYSTEM_PROMPT,
            consolidation_prompt(metadata, &combined, config.custom_prompt_template.as_deref()),
            budget.reserved_tokens,
        );
        drop(combined);

        let body = self
            .generator
            .generate(&request)
            .await
            .map_err(map_provider_error)?;

        Ok(Summary::new(
            format_summary(metadata, &body),
            SummaryPath::Chunked {
                total_chunks,
                summarized_chunks,
                truncated,
            },
        ))
    }

    async fn fallback(&self, metadata: &DocumentMetadata, config: &SummaryConfig) -> Summary {
        let abstract_summary = if self.policy.summarize_abstract_on_fallback && metadata.has_abstract() {
            let request = self.request(
                config,
                SYSTEM_PROMPT,
                abstract_prompt(metadata),
                self.policy.fallback_response_tokens,
            );
            match self.generator.generate(&request).await {
                Ok(summary) if !summary.trim().is_empty() => Some(summary),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "Abstract summary failed, using metadata only");
                    None
                }
            }
        } else {
            None
        };

        let body = fallback_body(abstract_summary.as_deref());
        Summary::new(format_summary(metadata, &body), SummaryPath::Fallback)
    }

    fn request(
        &self,
        config: &SummaryConfig,
        system_prompt: &str,
        user_prompt: String,
        max_response_tokens: usize,
    ) -> GenerationRequest {
        GenerationRequest {
            model: config.model.clone(),
            system_prompt: system_prompt.to_string(),
            user_prompt,
            temperature: config.temperature.clamp(0.0, 1.0),
            max_response_tokens,
        }
    }
}

fn template_for(config: &SummaryConfig) -> &str {
    config
        .custom_prompt_template
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_PROMPT_TEMPLATE)
}

/// Skips exact tokenization when the character estimate is already far
/// beyond the budget.
fn fits_budget(profile: TokenizerProfile, text: &str, max_tokens: usize) -> bool {
    if heuristic_tokens(text) > max_tokens.saturating_mul(2) {
        return false;
    }
    profile.count(text) <= max_tokens
}

pub fn map_provider_error(error: ProviderError) -> SummaryError {
    let kind = match &error {
        ProviderError::QuotaExceeded(_) => SummaryErrorKind::QuotaExceeded,
        ProviderError::RateLimited(_) => SummaryErrorKind::RateLimited,
        _ => SummaryErrorKind::ProviderError,
    };
    SummaryError::new(kind, error.diagnostic())
}

/// Shrinks `text` to `max_tokens` by keeping its head and tail (60/40 by
/// characters) around an explicit omission marker. Returns the text and
/// whether anything was omitted.
pub fn truncate_middle(
    text: &str,
    profile: TokenizerProfile,
    max_tokens: usize,
) -> Result<(String, bool), SummaryError> {
    let tokens = profile.count(text);
    if tokens <= max_tokens {
        return Ok((text.to_string(), false));
    }

    let chars = text.chars().collect::<Vec<_>>();
    let marker = format!("\n\n{}\n\n", OMISSION_MARKER);
    let mut keep = (chars.len() as f64 * max_tokens as f64 / tokens as f64) as usize;

    for _ in 0..MAX_TRUNCATION_ROUNDS {
        let head_len = (keep as f64 * HEAD_SHARE) as usize;
        let tail_len = keep.saturating_sub(head_len);
        let head = chars[..head_len].iter().collect::<String>();
        let tail = chars[chars.len() - tail_len..].iter().collect::<String>();
        let candidate = format!("{}{}{}", head.trim_end(), marker, tail.trim_start());

        if profile.count(&candidate) <= max_tokens {
            return Ok((candidate, true));
        }
        keep = keep * 9 / 10;
    }

    Err(SummaryError::general(format!(
        "combined summaries could not be reduced to {} tokens",
        max_tokens
    )))
}
