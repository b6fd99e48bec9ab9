use std::path::Path;

use config::{Config, File};

use super::{Environment, Settings};

pub const ENV_PREFIX: &str = "PAPERSUM";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Layers `appsettings.toml`, `appsettings.{environment}.toml` and
/// `PAPERSUM__SECTION__KEY` environment variables, later sources winning.
/// Missing files are skipped.
pub fn load_settings(config_dir: &Path, environment: Environment) -> Result<Settings, SettingsError> {
    let configuration = Config::builder()
        .add_source(File::from(config_dir.join("appsettings.toml")).required(false))
        .add_source(File::from(config_dir.join(environment.settings_file())).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = configuration.try_deserialize()?;
    tracing::debug!(
        environment = %environment,
        provider = %settings.llm.provider,
        model = %settings.llm.model,
        "Settings loaded"
    );
    Ok(settings)
}
