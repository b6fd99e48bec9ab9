mod document_extractor;
mod text_generator;

pub use document_extractor::{DocumentExtractor, ExtractionError};
pub use text_generator::{GenerationRequest, ProviderError, TextGenerator};
