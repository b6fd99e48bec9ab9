use crate::application::services::token_estimator::{TokenizerProfile, heuristic_tokens};
use crate::domain::Chunk;

pub const DEFAULT_MAX_CHUNK_TOKENS: usize = 2000;
pub const DEFAULT_OVERLAP_TOKENS: usize = 100;
const SEGMENT_CHARS: usize = 2000;
const MIN_SEGMENT_CHARS: usize = 16;

/// Splits text into ordered chunks whose token counts stay within a budget.
///
/// Each chunk after the first starts with up to `overlap_tokens` of text taken
/// from the end of its predecessor. Dropping that overlap from every chunk and
/// concatenating the rest reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct TokenChunker {
    profile: TokenizerProfile,
    max_tokens: usize,
    overlap_tokens: usize,
    segment_chars: usize,
}

impl TokenChunker {
    pub fn new(profile: TokenizerProfile, max_tokens: usize, overlap_tokens: usize) -> Self {
        let max_tokens = if max_tokens == 0 {
            tracing::warn!(
                default = DEFAULT_MAX_CHUNK_TOKENS,
                "Chunk budget is zero, falling back to default"
            );
            DEFAULT_MAX_CHUNK_TOKENS
        } else {
            max_tokens
        };
        let overlap_tokens = overlap_tokens.min(max_tokens / 2);
        let segment_chars = SEGMENT_CHARS.min((max_tokens * 2).max(MIN_SEGMENT_CHARS));

        Self {
            profile,
            max_tokens,
            overlap_tokens,
            segment_chars,
        }
    }

    pub fn for_model(model: &str, max_tokens: usize, overlap_tokens: usize) -> Self {
        Self::new(TokenizerProfile::for_model(model), max_tokens, overlap_tokens)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn overlap_tokens(&self) -> usize {
        self.overlap_tokens
    }

    /// Consumes `text`; the caller's copy is released once chunking returns.
    pub fn chunk(&self, text: String) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        if self.fits_at_a_glance(&text) {
            return vec![Chunk::new(text, 0, 1, 0)];
        }

        let ranges = self.plan_ranges(&text);
        let total = ranges.len();
        let chunks = ranges
            .into_iter()
            .enumerate()
            .map(|(index, (start, fresh, end))| {
                Chunk::new(text[start..end].to_string(), index, total, fresh - start)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            chunks = chunks.len(),
            max_tokens = self.max_tokens,
            overlap_tokens = self.overlap_tokens,
            "Text split into chunks"
        );

        chunks
    }

    fn count(&self, text: &str) -> usize {
        self.profile.count(text)
    }

    fn fits_at_a_glance(&self, text: &str) -> bool {
        let estimate = heuristic_tokens(text);
        estimate + estimate / 2 <= self.max_tokens && self.count(text) <= self.max_tokens
    }

    /// Returns `(start, fresh, end)` byte ranges. `start..fresh` is overlap
    /// repeated from the previous chunk and `fresh..end` is new content.
    fn plan_ranges(&self, text: &str) -> Vec<(usize, usize, usize)> {
        let len = text.len();
        let mut ranges = Vec::new();
        let mut start = 0;
        let mut fresh = 0;

        while fresh < len {
            let mut end = fresh;
            while end < len {
                let seg_end = self.segment_end(text, end);
                if self.count(&text[start..seg_end]) <= self.max_tokens {
                    end = seg_end;
                    continue;
                }
                end = self.largest_fitting_cut(text, start, end, seg_end);
                break;
            }

            if end == fresh {
                if start < fresh {
                    start = fresh;
                    continue;
                }
                // A single segment is denser than the whole budget.
                end = self.segment_end(text, fresh);
                tracing::warn!(
                    offset = fresh,
                    tokens = self.count(&text[fresh..end]),
                    max_tokens = self.max_tokens,
                    "Emitting oversized chunk for unsplittable segment"
                );
            }

            ranges.push((start, fresh, end));
            if end >= len {
                break;
            }

            start = self.overlap_start(text, fresh, end);
            fresh = end;
        }

        ranges
    }

    /// Advances `segment_chars` characters from `from`, then to the end of the
    /// following whitespace when one is close by.
    fn segment_end(&self, text: &str, from: usize) -> usize {
        let rest = &text[from..];
        let Some((offset, _)) = rest.char_indices().nth(self.segment_chars) else {
            return text.len();
        };
        let hard_end = from + offset;

        text[hard_end..]
            .char_indices()
            .take(self.segment_chars)
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| hard_end + i + c.len_utf8())
            .unwrap_or(hard_end)
    }

    /// Largest cut in `(lower, upper]` keeping `start..cut` within budget,
    /// pulled back to a word boundary where one exists. Returns `lower` when
    /// no cut fits.
    fn largest_fitting_cut(&self, text: &str, start: usize, lower: usize, upper: usize) -> usize {
        let cuts = text[lower..upper]
            .char_indices()
            .skip(1)
            .map(|(i, _)| lower + i)
            .chain(std::iter::once(upper))
            .collect::<Vec<_>>();

        let fitting = cuts.partition_point(|&cut| self.count(&text[start..cut]) <= self.max_tokens);
        if fitting == 0 {
            return lower;
        }
        let best = cuts[fitting - 1];

        text[lower..best]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| lower + i + c.len_utf8())
            .unwrap_or(best)
    }

    /// Smallest word-aligned position in `[lower, end]` whose suffix up to
    /// `end` fits in the overlap budget.
    fn overlap_start(&self, text: &str, lower: usize, end: usize) -> usize {
        if self.overlap_tokens == 0 {
            return end;
        }

        let starts = text[lower..end]
            .char_indices()
            .map(|(i, _)| lower + i)
            .chain(std::iter::once(end))
            .collect::<Vec<_>>();

        let too_long = starts.partition_point(|&p| self.count(&text[p..end]) > self.overlap_tokens);
        let candidate = starts[too_long.min(starts.len() - 1)];

        let at_word_start = candidate == lower
            || text[..candidate]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        if at_word_start {
            return candidate;
        }

        text[candidate..end]
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| candidate + i + c.len_utf8())
            .unwrap_or(end)
    }
}

/// Splits `text` for `model` with the default overlap.
pub fn chunk_text(text: String, model: &str, max_tokens: usize) -> Vec<Chunk> {
    TokenChunker::for_model(model, max_tokens, DEFAULT_OVERLAP_TOKENS).chunk(text)
}
