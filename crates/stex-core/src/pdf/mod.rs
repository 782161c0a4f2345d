//! PDF page-text extraction module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// The page text source capability: given a loaded document, produce an
/// ordered sequence of per-page plain-text strings. A page the backend
/// cannot extract text from is `None`, not an error.
pub trait PageTextSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document.
    fn page_count(&self) -> u32;

    /// Plain text per page, in physical page order.
    fn page_texts(&self) -> Result<Vec<Option<String>>>;
}
