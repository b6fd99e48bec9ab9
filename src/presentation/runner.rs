use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::DocumentExtractor;
use crate::application::services::SummarizationService;
use crate::domain::{DocumentMetadata, RawMetadata, SummaryError, SummaryResult};
use crate::infrastructure::llm::TextGeneratorFactory;
use crate::infrastructure::observability::sanitize_prompt;
use crate::infrastructure::text_processing::{CompositeExtractor, PdfExtractor};

use super::cli::Cli;
use super::config::{Settings, SummarySettings};

/// Reads a metadata record in the upstream JSON shape.
pub fn load_metadata(path: &Path) -> Result<DocumentMetadata> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata file {}", path.display()))?;
    let record: RawMetadata = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse metadata file {}", path.display()))?;
    Ok(DocumentMetadata::from_raw(record))
}

/// Inline text wins over a template file. An unreadable file is logged and
/// the default template is used instead.
pub fn load_custom_prompt(summary: &SummarySettings) -> Option<String> {
    if let Some(text) = summary
        .custom_prompt_text
        .as_ref()
        .filter(|t| !t.trim().is_empty())
    {
        tracing::info!(preview = %sanitize_prompt(text), "Using inline custom prompt");
        return Some(text.clone());
    }

    let path = summary.custom_prompt_path.as_ref()?;
    match std::fs::read_to_string(path) {
        Ok(template) if !template.trim().is_empty() => {
            tracing::info!(
                path = %path,
                preview = %sanitize_prompt(&template),
                "Custom prompt loaded"
            );
            Some(template)
        }
        Ok(_) => {
            tracing::warn!(path = %path, "Custom prompt file is empty, using default prompt");
            None
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Error loading custom prompt, using default prompt");
            None
        }
    }
}

pub fn output_path(output_dir: &Path, document: &Path, suffix: &str) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}_{}.md", stem, suffix))
}

fn default_metadata(document: &Path) -> DocumentMetadata {
    let title = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    DocumentMetadata::new(title)
}

/// Runs the selected processing mode and reports the exit status.
pub async fn run(cli: &Cli, settings: &Settings) -> Result<ExitCode> {
    tokio::fs::create_dir_all(&cli.output_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", cli.output_dir.display()))?;

    let extractor = Arc::new(CompositeExtractor::with_defaults(PdfExtractor::new()));
    let mut summary_source = cli.document.clone();

    if cli.mode.extracts() {
        let extracted = match extractor
            .extract(&cli.document, settings.summary.max_pdf_pages)
            .await
        {
            Ok(extracted) => extracted,
            Err(e) => {
                let error = SummaryError::extraction_failed(e.to_string());
                tracing::error!(path = %cli.document.display(), error = %e, "Text extraction failed");
                eprintln!("{}", error);
                return Ok(ExitCode::FAILURE);
            }
        };

        let text_path = output_path(&cli.output_dir, &cli.document, "text");
        tokio::fs::write(&text_path, extracted.as_str())
            .await
            .with_context(|| format!("failed to write {}", text_path.display()))?;
        tracing::info!(path = %text_path.display(), pages = extracted.pages_read(), "Extracted text saved");
        println!("{}", text_path.display());

        // The saved text is summarized directly instead of parsing the PDF twice.
        summary_source = text_path;
    }

    if !cli.mode.summarizes() {
        return Ok(ExitCode::SUCCESS);
    }

    let metadata = match &cli.metadata {
        Some(path) => load_metadata(path)?,
        None => default_metadata(&cli.document),
    };

    let generator = TextGeneratorFactory::create(
        settings.llm.provider,
        settings.llm.resolved_api_key(),
        settings.llm.base_url.clone(),
        settings.llm.timeout(),
    )?;

    let service = SummarizationService::new(extractor, generator, settings.summary_policy());
    let config = settings.summary_config(load_custom_prompt(&settings.summary));

    match service.summarize(&summary_source, &metadata, &config).await {
        SummaryResult::Success(summary) => {
            let summary_path = output_path(&cli.output_dir, &cli.document, "summary");
            tokio::fs::write(&summary_path, &summary.markdown)
                .await
                .with_context(|| format!("failed to write {}", summary_path.display()))?;
            if summary.is_abbreviated() {
                tracing::warn!(path = %summary_path.display(), "Saved abbreviated fallback summary");
            } else {
                tracing::info!(path = %summary_path.display(), "Summary saved");
            }
            println!("{}", summary_path.display());
            Ok(ExitCode::SUCCESS)
        }
        SummaryResult::Failed(error) => {
            eprintln!("{}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}
