//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PageTextSource, Result};
use crate::error::PdfError;

/// PDF page-text source backed by lopdf and pdf-extract.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Fallback when per-page extraction fails: extract the whole document
    /// and split the text evenly by line count across pages. Coarse, but
    /// the locating rules only need the marker lines to land on the right
    /// page most of the time.
    fn split_whole_text(&self, page_count: usize) -> Result<Vec<Option<String>>> {
        let full_text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let lines: Vec<&str> = full_text.lines().collect();
        let lines_per_page = lines.len() / page_count.max(1);

        let mut pages = Vec::with_capacity(page_count);
        for page in 0..page_count {
            let start = page * lines_per_page;
            let end = if page + 1 == page_count {
                lines.len()
            } else {
                (page + 1) * lines_per_page
            };
            let text = lines[start.min(lines.len())..end.min(lines.len())].join("\n");
            pages.push(non_blank(text));
        }

        Ok(pages)
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTextSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_texts(&self) -> Result<Vec<Option<String>>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages) => {
                debug!("Extracted text from {} pages", pages.len());
                Ok(pages.into_iter().map(non_blank).collect())
            }
            Err(e) => {
                debug!(
                    "Per-page extraction failed ({}), splitting whole-document text",
                    e
                );
                self.split_whole_text(self.page_count() as usize)
            }
        }
    }
}
