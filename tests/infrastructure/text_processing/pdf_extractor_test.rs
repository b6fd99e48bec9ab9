use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use papersum::application::ports::{DocumentExtractor, ExtractionError};
use papersum::infrastructure::text_processing::PdfExtractor;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/infrastructure/fixtures")
        .join(name)
}

#[tokio::test]
async fn given_missing_file_when_extracting_then_returns_error() {
    let extractor = PdfExtractor::new();

    let result = extractor
        .extract(Path::new("/nonexistent/paper.pdf"), None)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_then_returns_error() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"this is not a pdf document at all").unwrap();
    file.flush().unwrap();
    let extractor = PdfExtractor::with_timeout(Duration::from_secs(30));

    let result = extractor.extract(file.path(), Some(5)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_page_limit_of_one_when_extracting_then_reads_first_page_only() {
    let extractor = PdfExtractor::new();

    let extracted = extractor
        .extract(&fixture("three_pages.pdf"), Some(1))
        .await
        .unwrap();

    assert_eq!(extracted.pages_read(), 1);
    assert!(extracted.as_str().contains("Alpha"));
    assert!(!extracted.as_str().contains("Bravo"));
    assert!(!extracted.as_str().contains("Charlie"));
    assert!(!extracted.as_str().contains("\n\n"));
}

#[tokio::test]
async fn given_no_page_limit_when_extracting_then_joins_every_page_with_blank_line() {
    let extractor = PdfExtractor::new();

    let extracted = extractor
        .extract(&fixture("three_pages.pdf"), None)
        .await
        .unwrap();

    assert_eq!(extracted.pages_read(), 3);
    let pages: Vec<&str> = extracted.as_str().split("\n\n").collect();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("Alpha"));
    assert!(pages[1].contains("Bravo"));
    assert!(pages[2].contains("Charlie"));
}

#[tokio::test]
async fn given_limit_beyond_page_count_when_extracting_then_reads_every_page() {
    let extractor = PdfExtractor::new();

    let extracted = extractor
        .extract(&fixture("three_pages.pdf"), Some(10))
        .await
        .unwrap();

    assert_eq!(extracted.pages_read(), 3);
    assert!(extracted.as_str().contains("Charlie"));
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_then_returns_no_text_found() {
    let extractor = PdfExtractor::new();

    let result = extractor.extract(&fixture("blank_page.pdf"), None).await;

    assert!(matches!(result, Err(ExtractionError::NoTextFound)));
}
