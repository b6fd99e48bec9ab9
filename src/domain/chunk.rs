/// A contiguous slice of the document text sized to fit one model call.
///
/// `overlap_len` is the byte length of the leading text repeated from the
/// previous chunk; the first chunk never carries overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    pub total_count: usize,
    pub overlap_len: usize,
}

impl Chunk {
    pub fn new(text: String, index: usize, total_count: usize, overlap_len: usize) -> Self {
        Self {
            text,
            index,
            total_count,
            overlap_len,
        }
    }

    /// Text that did not appear in any earlier chunk.
    pub fn fresh_text(&self) -> &str {
        &self.text[self.overlap_len..]
    }

    /// One-based position, as shown to the model.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total_count
    }
}
