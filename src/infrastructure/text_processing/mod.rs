mod composite_extractor;
mod page_cleaner;
mod pdf_extractor;
mod plain_text_extractor;
mod static_extractor;
mod text_spool;

pub use composite_extractor::CompositeExtractor;
pub use page_cleaner::clean_page_text;
pub use pdf_extractor::{DEFAULT_EXTRACTION_TIMEOUT, PdfExtractor};
pub use plain_text_extractor::PlainTextExtractor;
pub use static_extractor::StaticExtractor;
pub use text_spool::TextSpool;
