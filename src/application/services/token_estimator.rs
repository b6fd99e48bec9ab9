use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};

static CL100K: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

static O200K: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::o200k_base().expect("Failed to initialize o200k_base tokenizer")
});

/// Characters per token assumed when no exact tokenizer is available.
pub const CHARS_PER_TOKEN: usize = 4;

/// How tokens are counted for a given model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerProfile {
    Cl100k,
    O200k,
    /// `ceil(chars / 4)`. An approximation, used for vendors whose
    /// tokenizer is not available locally.
    CharHeuristic,
}

impl TokenizerProfile {
    /// Unknown model names resolve to `Cl100k` rather than failing.
    pub fn for_model(model: &str) -> Self {
        let lower = model.to_lowercase();
        if lower.contains("claude") || lower.contains("anthropic") {
            return Self::CharHeuristic;
        }
        match get_tokenizer(&lower) {
            Some(Tokenizer::O200kBase) => Self::O200k,
            _ => Self::Cl100k,
        }
    }

    pub fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        match self {
            Self::Cl100k => CL100K.encode_with_special_tokens(text).len(),
            Self::O200k => O200K.encode_with_special_tokens(text).len(),
            Self::CharHeuristic => heuristic_tokens(text),
        }
    }

    pub fn is_exact(&self) -> bool {
        !matches!(self, Self::CharHeuristic)
    }
}

/// Cheap character-based estimate, used to skip exact tokenization of text
/// that is obviously too large or obviously small enough.
pub fn heuristic_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

pub fn estimate_tokens(text: &str, model: &str) -> usize {
    TokenizerProfile::for_model(model).count(text)
}
