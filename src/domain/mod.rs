mod chunk;
mod context_window;
mod document_metadata;
mod extracted_text;
mod summary_result;

pub use chunk::Chunk;
pub use context_window::{ContextWindowRule, ContextWindowTable, FALLBACK_CONTEXT_WINDOW};
pub use document_metadata::{
    DEFAULT_VENUE, DocumentMetadata, NO_ABSTRACT, NO_IDENTIFIER, RawAuthor, RawAuthorName,
    RawAuthors, RawMetadata, RawScalar, UNKNOWN_AUTHORS, UNKNOWN_CATEGORY, UNKNOWN_DATE,
    UNKNOWN_LICENSE, UNKNOWN_TITLE, repair_fragmented_authors,
};
pub use extracted_text::ExtractedText;
pub use summary_result::{Summary, SummaryError, SummaryErrorKind, SummaryPath, SummaryResult};
