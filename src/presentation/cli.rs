use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::config::{LlmProvider, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProcessingMode {
    /// Write the extracted text only.
    Extract,
    /// Write the summary only.
    Summarize,
    /// Write both the extracted text and the summary.
    Full,
}

impl ProcessingMode {
    pub fn extracts(&self) -> bool {
        matches!(self, Self::Extract | Self::Full)
    }

    pub fn summarizes(&self) -> bool {
        matches!(self, Self::Summarize | Self::Full)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for LlmProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => LlmProvider::OpenAi,
            ProviderArg::Anthropic => LlmProvider::Anthropic,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "papersum", version, about = "Summarize scientific papers within model token budgets")]
pub struct Cli {
    /// PDF, plain-text or Markdown document to process.
    pub document: PathBuf,
    /// JSON metadata record for the document.
    #[arg(long)]
    pub metadata: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ProcessingMode::Full)]
    pub mode: ProcessingMode,
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,
    /// File holding a custom prompt template.
    #[arg(long)]
    pub prompt: Option<PathBuf>,
    /// Inline custom prompt template; takes precedence over `--prompt`.
    #[arg(long)]
    pub prompt_text: Option<String>,
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub max_pages: Option<usize>,
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Directory searched for `appsettings*.toml`.
    #[arg(long, default_value = ".", env = "PAPERSUM_CONFIG_DIR")]
    pub config_dir: PathBuf,
}

impl Cli {
    /// Command-line flags win over file and environment configuration.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(provider) = self.provider {
            settings.llm.provider = provider.into();
        }
        if let Some(model) = &self.model {
            settings.llm.model = model.clone();
        }
        if let Some(pages) = self.max_pages {
            settings.summary.max_pdf_pages = Some(pages);
        }
        if let Some(temperature) = self.temperature {
            settings.llm.temperature = temperature;
        }
        if let Some(path) = &self.prompt {
            settings.summary.custom_prompt_path = Some(path.display().to_string());
        }
        if let Some(text) = &self.prompt_text {
            settings.summary.custom_prompt_text = Some(text.clone());
        }
    }
}
