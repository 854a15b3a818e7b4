use crate::utils::TabienError;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Extract the text layer of every page, pages separated by newlines.
    pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, TabienError> {
        if pdf_bytes.is_empty() {
            return Err(TabienError::PdfExtractionError("Empty PDF upload".to_string()));
        }

        // pdf-extract panics on some malformed documents instead of returning an error.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(pdf_bytes)
        }))
        .map_err(|_| {
            TabienError::PdfExtractionError("PDF parser panicked on malformed input".to_string())
        })?;

        let text = result.map_err(|e| {
            TabienError::PdfExtractionError(format!("Failed to extract text from PDF: {}", e))
        })?;

        log::debug!("Extracted {} characters of text from PDF", text.len());

        // Page breaks come through as form feeds.
        Ok(text.replace('\u{c}', "\n"))
    }

    pub fn extract_text_from_file(path: &Path) -> Result<String, TabienError> {
        let bytes = std::fs::read(path).map_err(|e| {
            TabienError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::extract_text(&bytes)
    }
}
