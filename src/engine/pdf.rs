use super::{DocDiag, Engine, ToolDiag};
use crate::{
    config::Config,
    error::AnalysisError,
    util::{check_binary, wait_with_timeout},
};
use anyhow::Result;
use lopdf::Document;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Text layer through lopdf; page rendering and OCR through the poppler and
/// tesseract command-line tools.
pub struct PdfEngine {
    cfg: Config,
}

impl PdfEngine {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    fn run_tool(&self, mut cmd: Command, tool: &str, hint: &str) -> Result<Output, AnalysisError> {
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AnalysisError::Ocr(format!("{tool} not found ({hint})"))
            } else {
                AnalysisError::Io(e)
            }
        })?;

        let output = if self.cfg.ocr.timeout_seconds > 0 {
            wait_with_timeout(&mut child, Duration::from_secs(self.cfg.ocr.timeout_seconds))
                .map_err(|e| AnalysisError::Ocr(format!("{tool}: {e:#}")))?
        } else {
            child.wait_with_output()?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalysisError::Ocr(format!(
                "{tool} failed: {}",
                stderr.trim()
            )));
        }
        Ok(output)
    }

    fn render_page(&self, input: &Path, page: u32, dir: &Path) -> Result<PathBuf, AnalysisError> {
        let page_str = page.to_string();
        let prefix = dir.join("page");

        let mut cmd = Command::new(&self.cfg.ocr.pdftoppm_exe);
        cmd.args(["-png", "-singlefile", "-r"])
            .arg(self.cfg.ocr.dpi.to_string())
            .args(["-f", &page_str, "-l", &page_str])
            .arg(input)
            .arg(&prefix);
        self.run_tool(cmd, "pdftoppm", "install poppler-utils")?;

        let image = prefix.with_extension("png");
        if !image.exists() {
            return Err(AnalysisError::Ocr(format!(
                "no image rendered for page {page}"
            )));
        }
        Ok(image)
    }

    fn tool_diag(exe: &str, hint: &str) -> ToolDiag {
        let available = check_binary(exe);
        ToolDiag {
            exe: exe.to_string(),
            available,
            hint: (!available).then(|| hint.to_string()),
        }
    }
}

impl Engine for PdfEngine {
    fn doctor(&self) -> Result<DocDiag> {
        let pdftoppm = Self::tool_diag(
            &self.cfg.ocr.pdftoppm_exe,
            "pdftoppm not installed. Install with: apt install poppler-utils",
        );
        let tesseract = Self::tool_diag(
            &self.cfg.ocr.tesseract_exe,
            "tesseract not installed. Install with: apt install tesseract-ocr",
        );
        let detection_languages = if self.cfg.detection.languages.is_empty() {
            vec!["all".to_string()]
        } else {
            self.cfg.detection.languages.clone()
        };
        Ok(DocDiag {
            ok: pdftoppm.available && tesseract.available,
            pdftoppm,
            tesseract,
            ocr_language: self.cfg.ocr.language.clone(),
            detection_languages,
        })
    }

    fn page_texts(&self, input: &Path) -> Result<Vec<String>, AnalysisError> {
        if !input.exists() {
            return Err(AnalysisError::not_found(input));
        }
        let doc = Document::load(input).map_err(|e| AnalysisError::DocumentOpen {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;

        let pages = doc.get_pages();
        debug!("opened {} pages={}", input.display(), pages.len());

        Ok(pages
            .keys()
            .map(|&page| text_layer_or_blank(page, doc.extract_text(&[page])))
            .collect())
    }

    fn ocr_page(&self, input: &Path, page: u32) -> Result<String, AnalysisError> {
        let tmp = TempDir::new()?;
        let image = self.render_page(input, page, tmp.path())?;

        let mut cmd = Command::new(&self.cfg.ocr.tesseract_exe);
        cmd.arg(&image)
            .arg("stdout")
            .args(["-l", &self.cfg.ocr.language]);
        let output = self.run_tool(cmd, "tesseract", "install tesseract-ocr")?;

        debug!("ocr page {} bytes={}", page, output.stdout.len());
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A page whose text layer cannot be decoded is treated as having none, so it
/// goes through OCR like an image-only page.
pub fn text_layer_or_blank<E: Display>(page: u32, text: Result<String, E>) -> String {
    text.unwrap_or_else(|e| {
        warn!("page {} text layer unreadable, treating as image: {}", page, e);
        String::new()
    })
}
