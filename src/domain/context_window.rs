use serde::Deserialize;

pub const FALLBACK_CONTEXT_WINDOW: usize = 4000;

/// Maps a model-name fragment to the context window of the models it matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContextWindowRule {
    pub pattern: String,
    pub tokens: usize,
}

impl ContextWindowRule {
    pub fn new(pattern: impl Into<String>, tokens: usize) -> Self {
        Self {
            pattern: pattern.into(),
            tokens,
        }
    }

    fn matches(&self, model_lower: &str) -> bool {
        model_lower.contains(&self.pattern.to_lowercase())
    }
}

/// Ordered lookup table from model name to context window size.
///
/// Rules are checked in order and the first case-insensitive substring match
/// wins, so more specific fragments must come before broader ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindowTable {
    rules: Vec<ContextWindowRule>,
    fallback: usize,
}

impl Default for ContextWindowTable {
    fn default() -> Self {
        Self {
            rules: vec![
                ContextWindowRule::new("32k", 32000),
                ContextWindowRule::new("16k", 16000),
                ContextWindowRule::new("gpt-4", 16000),
                ContextWindowRule::new("claude-3", 200000),
                ContextWindowRule::new("claude-sonnet-4", 200000),
                ContextWindowRule::new("claude-opus-4", 200000),
                ContextWindowRule::new("claude", 100000),
            ],
            fallback: FALLBACK_CONTEXT_WINDOW,
        }
    }
}

impl ContextWindowTable {
    pub fn new(rules: Vec<ContextWindowRule>, fallback: usize) -> Self {
        Self { rules, fallback }
    }

    /// Places `overrides` ahead of the default rules.
    pub fn with_overrides(overrides: Vec<ContextWindowRule>) -> Self {
        let mut table = Self::default();
        if !overrides.is_empty() {
            let defaults = std::mem::take(&mut table.rules);
            table.rules = overrides.into_iter().chain(defaults).collect();
        }
        table
    }

    pub fn lookup(&self, model: &str) -> usize {
        let model_lower = model.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&model_lower))
            .map(|rule| rule.tokens)
            .unwrap_or(self.fallback)
    }

    pub fn rules(&self) -> &[ContextWindowRule] {
        &self.rules
    }
}
