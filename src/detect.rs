use crate::{config::Detection, error::AnalysisError, report::LanguageDistribution};
use anyhow::{Result, anyhow, bail};
use lingua::{IsoCode639_1, LanguageDetector, LanguageDetectorBuilder};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::trace;

/// Identifies the natural language of a piece of text.
pub trait LanguageDetect {
    /// ISO 639-1 code of the language, or `LanguageDetection` when the text
    /// carries no usable signal.
    fn detect(&self, text: &str) -> Result<String, AnalysisError>;
}

pub struct LinguaDetector {
    detector: LanguageDetector,
}

impl LinguaDetector {
    pub fn new(cfg: &Detection) -> Result<Self> {
        if !(0.0..=0.99).contains(&cfg.minimum_relative_distance) {
            bail!(
                "detection.minimum_relative_distance must be in [0, 0.99]: {}",
                cfg.minimum_relative_distance
            );
        }

        let mut builder = if cfg.languages.is_empty() {
            LanguageDetectorBuilder::from_all_languages()
        } else {
            let codes = cfg
                .languages
                .iter()
                .map(|c| {
                    IsoCode639_1::from_str(c.trim())
                        .map_err(|_| anyhow!("unknown ISO 639-1 language code: {c}"))
                })
                .collect::<Result<Vec<_>>>()?;
            if codes.len() < 2 {
                bail!("detection.languages needs at least two codes, or none for all");
            }
            LanguageDetectorBuilder::from_iso_codes_639_1(&codes)
        };

        builder.with_minimum_relative_distance(cfg.minimum_relative_distance);
        if cfg.low_accuracy {
            builder.with_low_accuracy_mode();
        }

        Ok(Self {
            detector: builder.build(),
        })
    }
}

impl LanguageDetect for LinguaDetector {
    fn detect(&self, text: &str) -> Result<String, AnalysisError> {
        self.detector
            .detect_language_of(text)
            .map(|lang| lang.iso_code_639_1().to_string().to_lowercase())
            .ok_or_else(|| AnalysisError::LanguageDetection("no language features in text".into()))
    }
}

/// Tally detected languages over `chunks`.
///
/// Each percentage is `count / chunks.len() * 100`. Chunks that fail
/// detection stay in the denominator, so the shares can sum below 100.
pub fn detect_languages(
    detector: &dyn LanguageDetect,
    chunks: &[String],
) -> (Option<String>, LanguageDistribution) {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (i, chunk) in chunks.iter().enumerate() {
        match detector.detect(chunk) {
            Ok(lang) => {
                let n = counts.entry(lang.clone()).or_insert(0);
                if *n == 0 {
                    order.push(lang);
                }
                *n += 1;
            }
            Err(e) => trace!("chunk {} skipped: {}", i, e),
        }
    }

    let total = chunks.len() as f64;
    let mut dist = LanguageDistribution::new();
    for lang in order {
        let count = counts[&lang] as f64;
        dist.insert(lang, count / total * 100.0);
    }

    let dominant = dist.dominant().map(str::to_string);
    (dominant, dist)
}
