use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::ExtractedText;

use super::page_cleaner::clean_page_text;
use super::text_spool::TextSpool;

pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Reads PDF pages in order, one at a time, spooling cleaned text to disk.
pub struct PdfExtractor {
    timeout: Duration,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(path: &Path, max_pages: Option<usize>) -> Result<ExtractedText, ExtractionError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| ExtractionError::OpenFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;
        let pages_to_read = max_pages.map_or(page_count, |limit| limit.min(page_count));
        tracing::debug!(page_count, pages_to_read, "PDF opened");

        let mut spool = TextSpool::new()?;
        for page_index in 0..pages_to_read {
            match doc.extract_text(page_index) {
                Ok(raw) => {
                    let page = clean_page_text(&raw);
                    spool.append_page(&page)?;
                }
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable page");
                }
            }
        }

        if spool.is_empty() {
            return Err(ExtractionError::NoTextFound);
        }

        let pages_read = spool.pages();
        let text = spool.finish()?;
        Ok(ExtractedText::new(text, pages_read))
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<ExtractedText, ExtractionError> {
        let owned: PathBuf = path.to_path_buf();

        let extracted = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned, max_pages)),
        )
        .await
        .map_err(|_| ExtractionError::TimedOut(self.timeout.as_secs()))?
        .map_err(|e| ExtractionError::TaskFailed(e.to_string()))??;

        tracing::info!(
            pages_read = extracted.pages_read(),
            chars = extracted.as_str().len(),
            "PDF text extraction complete"
        );
        Ok(extracted)
    }
}
