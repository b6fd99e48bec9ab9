use std::path::PathBuf;

use clap::Parser;
use papersum::presentation::config::{LlmProvider, Settings};
use papersum::presentation::{Cli, ProcessingMode};

#[test]
fn given_only_document_when_parsing_then_uses_defaults() {
    let cli = Cli::try_parse_from(["papersum", "paper.pdf"]).unwrap();

    assert_eq!(cli.document, PathBuf::from("paper.pdf"));
    assert_eq!(cli.mode, ProcessingMode::Full);
    assert_eq!(cli.output_dir, PathBuf::from("output"));
    assert!(cli.metadata.is_none());
}

#[test]
fn given_missing_document_when_parsing_then_fails() {
    assert!(Cli::try_parse_from(["papersum"]).is_err());
}

#[test]
fn given_unknown_mode_when_parsing_then_fails() {
    assert!(Cli::try_parse_from(["papersum", "paper.pdf", "--mode", "translate"]).is_err());
}

#[test]
fn given_modes_when_checking_stages_then_full_runs_both() {
    assert!(ProcessingMode::Extract.extracts());
    assert!(!ProcessingMode::Extract.summarizes());
    assert!(!ProcessingMode::Summarize.extracts());
    assert!(ProcessingMode::Summarize.summarizes());
    assert!(ProcessingMode::Full.extracts() && ProcessingMode::Full.summarizes());
}

#[test]
fn given_flags_when_applying_overrides_then_flags_win_over_settings() {
    let cli = Cli::try_parse_from([
        "papersum",
        "paper.pdf",
        "--mode",
        "summarize",
        "--provider",
        "anthropic",
        "--model",
        "claude-3-5-sonnet-20241022",
        "--max-pages",
        "12",
        "--temperature",
        "0.5",
        "--prompt",
        "prompts/review.md",
        "--prompt-text",
        "Summarize {title}",
    ])
    .unwrap();
    let mut settings = Settings::default();

    cli.apply_overrides(&mut settings);

    assert_eq!(cli.mode, ProcessingMode::Summarize);
    assert_eq!(settings.llm.provider, LlmProvider::Anthropic);
    assert_eq!(settings.llm.model, "claude-3-5-sonnet-20241022");
    assert_eq!(settings.llm.temperature, 0.5);
    assert_eq!(settings.summary.max_pdf_pages, Some(12));
    assert_eq!(
        settings.summary.custom_prompt_path.as_deref(),
        Some("prompts/review.md")
    );
    assert_eq!(
        settings.summary.custom_prompt_text.as_deref(),
        Some("Summarize {title}")
    );
}

#[test]
fn given_no_flags_when_applying_overrides_then_settings_unchanged() {
    let cli = Cli::try_parse_from(["papersum", "paper.pdf"]).unwrap();
    let mut settings = Settings::default();

    cli.apply_overrides(&mut settings);

    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
    assert_eq!(settings.llm.model, "gpt-4o-mini");
    assert!(settings.summary.max_pdf_pages.is_none());
}
