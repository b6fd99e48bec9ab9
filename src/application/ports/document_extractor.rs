use std::path::Path;

use async_trait::async_trait;

use crate::domain::ExtractedText;

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Reads at most `max_pages` pages, or all of them when `None`.
    async fn extract(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<ExtractedText, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to open document: {0}")]
    OpenFailed(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in document")]
    NoTextFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("extraction timed out after {0}s")]
    TimedOut(u64),
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}
