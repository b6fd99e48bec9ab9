use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

const PAGE_SEPARATOR: &str = "\n\n";

/// Disk-backed accumulator for extracted page text.
///
/// Pages are appended to a temporary file so only one page is held in memory
/// while reading. The file is removed when the spool is dropped, whether or
/// not `finish` was reached.
pub struct TextSpool {
    writer: BufWriter<NamedTempFile>,
    pages: usize,
}

impl TextSpool {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(NamedTempFile::new()?),
            pages: 0,
        })
    }

    /// Appends one page; blank pages are ignored.
    pub fn append_page(&mut self, text: &str) -> std::io::Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if self.pages > 0 {
            self.writer.write_all(PAGE_SEPARATOR.as_bytes())?;
        }
        self.writer.write_all(text.as_bytes())?;
        self.pages += 1;
        Ok(())
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }

    pub fn path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Reads the accumulated text back and deletes the backing file.
    pub fn finish(self) -> std::io::Result<String> {
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.as_file_mut().seek(SeekFrom::Start(0))?;

        let mut text = String::new();
        file.as_file_mut().read_to_string(&mut text)?;
        file.close()?;
        Ok(text)
    }
}
