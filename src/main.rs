use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use papersum::infrastructure::observability::{TracingConfig, init_tracing};
use papersum::presentation::{Cli, Environment, load_settings, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = load_settings(&cli.config_dir, environment)
        .context("failed to load settings")?;
    cli.apply_overrides(&mut settings);

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        settings.logging.level.as_deref(),
    ));

    tracing::info!(
        document = %cli.document.display(),
        mode = ?cli.mode,
        provider = %settings.llm.provider,
        model = %settings.llm.model,
        "Processing document"
    );

    run(&cli, &settings).await
}
