pub const DEFAULT_LOG_FILTER: &str = "info,papersum=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TracingConfig {
    /// `LOG_FORMAT=json` still wins over `json_format = false`.
    pub fn new(environment: impl Into<String>, json_format: bool, level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.into(),
            json_format: json_format || defaults.json_format,
            default_filter: level
                .filter(|l| !l.trim().is_empty())
                .map(|l| format!("{},papersum={}", l.trim(), l.trim()))
                .unwrap_or(defaults.default_filter),
        }
    }
}
