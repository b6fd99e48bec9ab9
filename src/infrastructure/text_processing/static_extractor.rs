use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::ExtractedText;

/// Returns fixed text for any path. `StaticExtractor::failing()` always
/// reports an unreadable document. Every page limit it is called with is
/// recorded.
pub struct StaticExtractor {
    text: Option<String>,
    page_limits: Mutex<Vec<Option<usize>>>,
}

impl StaticExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            page_limits: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            page_limits: Mutex::new(Vec::new()),
        }
    }

    pub fn page_limits(&self) -> Vec<Option<usize>> {
        self.recorded().clone()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<Option<usize>>> {
        self.page_limits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentExtractor for StaticExtractor {
    async fn extract(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<ExtractedText, ExtractionError> {
        self.recorded().push(max_pages);

        match &self.text {
            Some(text) => Ok(ExtractedText::new(text.clone(), 1)),
            None => Err(ExtractionError::OpenFailed(path.display().to_string())),
        }
    }
}
