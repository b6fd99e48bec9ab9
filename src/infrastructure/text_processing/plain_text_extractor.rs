use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::ExtractedText;

use super::page_cleaner::clean_page_text;

/// Form feed separates pages in plain-text exports.
const PAGE_BREAK: char = '\x0c';

pub struct PlainTextExtractor;

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<ExtractedText, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        let raw = String::from_utf8(bytes)
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;

        let limit = max_pages.unwrap_or(usize::MAX);
        let pages = raw
            .split(PAGE_BREAK)
            .take(limit)
            .map(clean_page_text)
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>();

        if pages.is_empty() {
            return Err(ExtractionError::NoTextFound);
        }

        Ok(ExtractedText::new(pages.join("\n\n"), pages.len()))
    }
}
