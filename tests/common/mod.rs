#![allow(dead_code)]

use doc_lingo::{
    detect::LanguageDetect,
    engine::{DocDiag, Engine, ToolDiag},
    error::AnalysisError,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory PDFs: a text layer per page plus the text OCR would return.
#[derive(Default)]
pub struct FakeEngine {
    docs: HashMap<PathBuf, Vec<String>>,
    ocr: HashMap<(PathBuf, u32), String>,
    ocr_errors: HashSet<(PathBuf, u32)>,
    pub ocr_calls: RefCell<Vec<u32>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, path: impl Into<PathBuf>, pages: &[&str]) -> Self {
        self.docs
            .insert(path.into(), pages.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_ocr(mut self, path: impl Into<PathBuf>, page: u32, text: &str) -> Self {
        self.ocr.insert((path.into(), page), text.to_string());
        self
    }

    pub fn with_ocr_error(mut self, path: impl Into<PathBuf>, page: u32) -> Self {
        self.ocr_errors.insert((path.into(), page));
        self
    }
}

impl Engine for FakeEngine {
    fn doctor(&self) -> anyhow::Result<DocDiag> {
        let tool = |exe: &str| ToolDiag {
            exe: exe.to_string(),
            available: true,
            hint: None,
        };
        Ok(DocDiag {
            ok: true,
            pdftoppm: tool("pdftoppm"),
            tesseract: tool("tesseract"),
            ocr_language: "eng".into(),
            detection_languages: vec!["all".into()],
        })
    }

    fn page_texts(&self, input: &Path) -> Result<Vec<String>, AnalysisError> {
        self.docs
            .get(input)
            .cloned()
            .ok_or_else(|| AnalysisError::not_found(input))
    }

    fn ocr_page(&self, input: &Path, page: u32) -> Result<String, AnalysisError> {
        self.ocr_calls.borrow_mut().push(page);
        let key = (input.to_path_buf(), page);
        if self.ocr_errors.contains(&key) {
            return Err(AnalysisError::Ocr(format!("tesseract failed on page {page}")));
        }
        Ok(self
            .ocr
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

/// Reads the language from a leading two-letter tag, e.g. `"en some text"`.
pub struct TagDetector;

impl LanguageDetect for TagDetector {
    fn detect(&self, text: &str) -> Result<String, AnalysisError> {
        match text.split_whitespace().next() {
            Some(tag) if tag.len() == 2 && tag.chars().all(|c| c.is_ascii_lowercase()) => {
                Ok(tag.to_string())
            }
            _ => Err(AnalysisError::LanguageDetection(format!(
                "no tag in {text:?}"
            ))),
        }
    }
}

pub fn chunks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
