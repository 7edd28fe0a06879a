use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while analyzing a single document.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot open document {}: {reason}", .path.display())]
    DocumentOpen { path: PathBuf, reason: String },

    #[error("language detection failed: {0}")]
    LanguageDetection(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        AnalysisError::DocumentOpen {
            path: path.into(),
            reason: "no such file or directory".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            AnalysisError::DocumentOpen { path, .. } => !path.exists(),
            AnalysisError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
