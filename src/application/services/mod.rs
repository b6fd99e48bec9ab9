mod chunker;
mod prompt_builder;
mod summarization_service;
mod token_estimator;

pub use chunker::{DEFAULT_MAX_CHUNK_TOKENS, DEFAULT_OVERLAP_TOKENS, TokenChunker, chunk_text};
pub use prompt_builder::{
    CONSOLIDATION_SYSTEM_PROMPT, DEFAULT_PROMPT_TEMPLATE, FALLBACK_BANNER, PREPRINT_METRIC,
    PromptFrame, SYSTEM_PROMPT, abstract_prompt, build_prompt, combine_part_summaries,
    consolidation_prompt, fallback_body, format_summary, template_embeds_paper_text,
};
pub use summarization_service::{
    OMISSION_MARKER, SummarizationService, SummaryConfig, SummaryPolicy, TokenBudget,
    map_provider_error, truncate_middle,
};
pub use token_estimator::{CHARS_PER_TOKEN, TokenizerProfile, estimate_tokens, heuristic_tokens};
