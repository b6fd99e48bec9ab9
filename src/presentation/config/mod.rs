mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::{ENV_PREFIX, SettingsError, load_settings};
pub use settings::{LlmProvider, LlmSettings, LoggingSettings, Settings, SummarySettings};
