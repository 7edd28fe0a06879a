use crate::{
    checkpoint::write_checkpoint,
    config::Config,
    detect::{LanguageDetect, detect_languages},
    engine::Engine,
    error::AnalysisError,
    extract::extract_text,
    manifest::read_manifest,
    report::{AnalysisResult, BatchRecord, BatchSummary},
    util::ensure_dir,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub struct DocumentAnalyzer<E: Engine, D: LanguageDetect> {
    cfg: Config,
    engine: E,
    detector: D,
    results: Vec<BatchRecord>,
}

impl<E: Engine, D: LanguageDetect> DocumentAnalyzer<E, D> {
    pub fn new(cfg: &Config, engine: E, detector: D) -> Self {
        Self {
            cfg: cfg.clone(),
            engine,
            detector,
            results: Vec::new(),
        }
    }

    /// Records accumulated by the last batch run.
    pub fn results(&self) -> &[BatchRecord] {
        &self.results
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        PathBuf::from(&self.cfg.paths.checkpoint_file)
    }

    pub fn try_analyze_document(&self, path: &Path) -> Result<AnalysisResult, AnalysisError> {
        let extracted = extract_text(&self.engine, path, self.cfg.extraction.ocr_fallback)?;
        let (dominant_language, language_distribution) =
            detect_languages(&self.detector, &extracted.chunks);

        Ok(AnalysisResult {
            is_scanned: extracted.is_scanned,
            dominant_language,
            language_distribution,
        })
    }

    /// Analyze one PDF. Failures are logged and yield `None`.
    pub fn analyze_document(&self, path: &Path) -> Option<AnalysisResult> {
        match self.try_analyze_document(path) {
            Ok(result) => Some(result),
            Err(err) if err.is_not_found() => {
                error!("{}", err);
                None
            }
            Err(err) => {
                error!("An error occurred: {}", err);
                None
            }
        }
    }

    fn write_result(&self, path: &Path, result: &AnalysisResult) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(path, result.render(self.cfg.output.result_format)?)
            .with_context(|| format!("writing result: {}", path.display()))
    }

    /// Analyze every manifest row in order and write the checkpoint.
    pub fn analyze_batch(&mut self) -> Result<BatchSummary> {
        if self.cfg.batch.num_processes > 1 {
            warn!(
                "num_processes={} is configured, but documents are analyzed sequentially",
                self.cfg.batch.num_processes
            );
        }

        let entries = read_manifest(Path::new(&self.cfg.paths.manifest))?;
        let input_folder = PathBuf::from(&self.cfg.paths.input_folder);
        let out_dir = PathBuf::from(&self.cfg.paths.out_dir);
        ensure_dir(&out_dir)?;

        self.results.clear();

        for (index, entry) in entries.iter().enumerate() {
            let document_number = index + 1;
            let pdf_path = entry.pdf_path(&input_folder);
            info!("Processing Document {}: {}", document_number, pdf_path.display());

            let Some(result) = self.analyze_document(&pdf_path) else {
                continue;
            };

            info!("Result for {}:", entry.filename);
            info!("  Is Scanned: {}", result.is_scanned);
            info!(
                "  Dominant Language: {}",
                result.dominant_language.as_deref().unwrap_or("None")
            );
            info!(
                "  Language Distribution: {}",
                result.language_distribution.to_literal()
            );

            let output_path = out_dir.join(format!("{}_result.json", entry.filename));
            if let Err(err) = self.write_result(&output_path, &result) {
                error!("skipping {}: {:#}", entry.filename, err);
                continue;
            }

            self.results
                .push(BatchRecord::new(&entry.filename, document_number, &result));
        }

        let checkpoint = if self.results.is_empty() {
            info!("no documents analyzed; checkpoint not written");
            None
        } else {
            let path = self.checkpoint_path();
            write_checkpoint(&path, &self.results, self.cfg.output.result_format)?;
            info!("Results saved to {}", path.display());
            Some(path.display().to_string())
        };

        Ok(BatchSummary {
            total: entries.len(),
            analyzed: self.results.len(),
            skipped: entries.len() - self.results.len(),
            checkpoint,
        })
    }
}
