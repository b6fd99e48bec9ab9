use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::ExtractedText;

use super::{PdfExtractor, PlainTextExtractor};

/// Routes each document to an extractor chosen by file extension.
pub struct CompositeExtractor {
    extractors: HashMap<String, Arc<dyn DocumentExtractor>>,
}

impl CompositeExtractor {
    pub fn new(extractors: Vec<(&str, Arc<dyn DocumentExtractor>)>) -> Self {
        Self {
            extractors: extractors
                .into_iter()
                .map(|(ext, extractor)| (ext.to_lowercase(), extractor))
                .collect(),
        }
    }

    /// PDF plus the plain-text and Markdown formats.
    pub fn with_defaults(pdf: PdfExtractor) -> Self {
        let text: Arc<dyn DocumentExtractor> = Arc::new(PlainTextExtractor);
        Self::new(vec![
            ("pdf", Arc::new(pdf)),
            ("txt", Arc::clone(&text)),
            ("md", Arc::clone(&text)),
            ("markdown", text),
        ])
    }
}

#[async_trait]
impl DocumentExtractor for CompositeExtractor {
    async fn extract(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<ExtractedText, ExtractionError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let extractor = self
            .extractors
            .get(&extension)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(path.display().to_string()))?;

        extractor.extract(path, max_pages).await
    }
}
