/// Plain text pulled out of a document, with the number of pages that
/// contributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    text: String,
    pages_read: usize,
}

impl ExtractedText {
    pub fn new(text: String, pages_read: usize) -> Self {
        Self { text, pages_read }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
