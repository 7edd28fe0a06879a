use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocDiag {
    pub ok: bool,
    pub pdftoppm: ToolDiag,
    pub tesseract: ToolDiag,
    pub ocr_language: String,
    pub detection_languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDiag {
    pub exe: String,
    pub available: bool,
    #[serde(default)]
    pub hint: Option<String>,
}
