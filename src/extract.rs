use crate::{engine::Engine, error::AnalysisError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("static regex"));

/// Per-page cleaned text of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// One entry per page, in page order; empty pages are kept.
    pub chunks: Vec<String>,
    /// Set once any page had no text layer.
    pub is_scanned: bool,
}

/// Replace every run of non-ASCII characters with a single space.
pub fn clean_ascii(text: &str) -> String {
    NON_ASCII.replace_all(text, " ").into_owned()
}

pub fn extract_text(
    engine: &dyn Engine,
    input: &Path,
    ocr_fallback: bool,
) -> Result<ExtractedText, AnalysisError> {
    let pages = engine.page_texts(input)?;
    let mut chunks = Vec::with_capacity(pages.len());
    let mut is_scanned = false;

    for (i, text) in pages.into_iter().enumerate() {
        let page = i as u32 + 1;
        // lopdf can emit bare newlines for image-only pages, so blank counts as empty.
        let text = if text.trim().is_empty() {
            is_scanned = true;
            if ocr_fallback {
                info!("page {} has no text layer; running OCR", page);
                engine.ocr_page(input, page)?
            } else {
                debug!("page {} has no text layer; OCR disabled", page);
                String::new()
            }
        } else {
            text
        };
        chunks.push(clean_ascii(&text));
    }

    Ok(ExtractedText { chunks, is_scanned })
}
