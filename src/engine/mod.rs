pub mod pdf;
pub mod types;

use crate::error::AnalysisError;
use anyhow::Result;
use std::path::Path;

pub use pdf::PdfEngine;
pub use types::{DocDiag, ToolDiag};

/// Page-level access to a PDF: its text layer, and OCR of a rendered page.
pub trait Engine {
    fn doctor(&self) -> Result<DocDiag>;
    /// Direct text of every page, in page order.
    fn page_texts(&self, input: &Path) -> Result<Vec<String>, AnalysisError>;
    /// Rasterize page `page` (1-based) and return the recognized text.
    fn ocr_page(&self, input: &Path, page: u32) -> Result<String, AnalysisError>;
}
