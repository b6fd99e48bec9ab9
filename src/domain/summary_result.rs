use std::fmt;

use serde::Serialize;

/// Closed set of reasons a summarization run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryErrorKind {
    ExtractionFailed,
    QuotaExceeded,
    RateLimited,
    ProviderError,
    GeneralError,
}

impl SummaryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractionFailed => "extraction_failed",
            Self::QuotaExceeded => "quota_exceeded",
            Self::RateLimited => "rate_limited",
            Self::ProviderError => "provider_error",
            Self::GeneralError => "general_error",
        }
    }

    /// Whether a caller processing a batch should stop issuing further calls.
    pub fn halts_batch(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }
}

impl fmt::Display for SummaryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("summary failed [{kind}]: {message}")]
pub struct SummaryError {
    pub kind: SummaryErrorKind,
    pub message: String,
}

impl SummaryError {
    pub fn new(kind: SummaryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::new(SummaryErrorKind::ExtractionFailed, message)
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::new(SummaryErrorKind::GeneralError, message)
    }
}

/// How the body of a successful summary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum SummaryPath {
    SinglePass,
    Chunked {
        total_chunks: usize,
        summarized_chunks: usize,
        truncated: bool,
    },
    /// Every chunk call failed; the body was built from metadata alone.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub markdown: String,
    pub path: SummaryPath,
}

impl Summary {
    pub fn new(markdown: String, path: SummaryPath) -> Self {
        Self { markdown, path }
    }

    pub fn is_abbreviated(&self) -> bool {
        matches!(self.path, SummaryPath::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    Success(Summary),
    Failed(SummaryError),
}

impl SummaryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Self::Success(summary) => Some(summary),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SummaryError> {
        match self {
            Self::Success(_) => None,
            Self::Failed(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Summary, SummaryError> {
        match self {
            Self::Success(summary) => Ok(summary),
            Self::Failed(error) => Err(error),
        }
    }
}

impl From<Result<Summary, SummaryError>> for SummaryResult {
    fn from(result: Result<Summary, SummaryError>) -> Self {
        match result {
            Ok(summary) => Self::Success(summary),
            Err(error) => Self::Failed(error),
        }
    }
}
