pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, ProcessingMode, ProviderArg};
pub use config::{Environment, LlmProvider, Settings, load_settings};
pub use runner::{load_custom_prompt, load_metadata, output_path, run};
