use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub batch: Batch,
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub ocr: Ocr,
    #[serde(default)]
    pub detection: Detection,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub input_folder: String,
    pub manifest: String,
    pub out_dir: String,
    /// Relative to the working directory, not `out_dir`.
    pub checkpoint_file: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            input_folder: ".".into(),
            manifest: "filenames.csv".into(),
            out_dir: "out".into(),
            checkpoint_file: "checkpoint.xlsx".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Accepted for compatibility; documents are always processed sequentially.
    pub num_processes: usize,
}
impl Default for Batch {
    fn default() -> Self {
        Self { num_processes: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub ocr_fallback: bool,
}
impl Default for Extraction {
    fn default() -> Self {
        Self { ocr_fallback: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ocr {
    pub dpi: u32,
    pub language: String,
    pub timeout_seconds: u64,
    pub pdftoppm_exe: String,
    pub tesseract_exe: String,
}
impl Default for Ocr {
    fn default() -> Self {
        Self {
            dpi: 300,
            language: "eng".into(),
            timeout_seconds: 0,
            pdftoppm_exe: "pdftoppm".into(),
            tesseract_exe: "tesseract".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// ISO 639-1 codes. Empty means every language the detector knows.
    pub languages: Vec<String>,
    pub minimum_relative_distance: f64,
    pub low_accuracy: bool,
}
impl Default for Detection {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            minimum_relative_distance: 0.0,
            low_accuracy: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    Json,
    Literal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub result_format: ResultFormat,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            result_format: ResultFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
