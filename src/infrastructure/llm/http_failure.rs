use reqwest::StatusCode;

use crate::application::ports::ProviderError;

/// Maps a non-success provider response onto the error taxonomy.
///
/// Both backends signal exhausted credit and plain throttling with 429; the
/// body text is what tells them apart.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> ProviderError {
    let diagnostic = format!("HTTP {}: {}", status, body);
    let lower = body.to_lowercase();

    if lower.contains("insufficient_quota")
        || lower.contains("quota")
        || lower.contains("credit balance")
    {
        return ProviderError::QuotaExceeded(diagnostic);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(diagnostic),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(diagnostic),
        _ => ProviderError::ApiRequestFailed(diagnostic),
    }
}

pub(crate) fn classify_transport(error: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::ApiRequestFailed(error.to_string())
    }
}
