use crate::config::ResultFormat;
use anyhow::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Percentage of chunks per language code, kept in first-detection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageDistribution(Vec<(String, f64)>);

impl LanguageDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the percentage for `lang`, keeping its first position.
    pub fn insert(&mut self, lang: impl Into<String>, pct: f64) {
        let lang = lang.into();
        match self.0.iter_mut().find(|(l, _)| *l == lang) {
            Some(slot) => slot.1 = pct,
            None => self.0.push((lang, pct)),
        }
    }

    pub fn get(&self, lang: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == lang).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, p)| p).sum()
    }

    /// Language with the highest share; the earliest wins a tie.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (lang, pct) in self.iter() {
            match best {
                Some((_, b)) if pct <= b => {}
                _ => best = Some((lang, pct)),
            }
        }
        best.map(|(lang, _)| lang)
    }

    /// Literal mapping text, e.g. `{'en': 75.0, 'fr': 25.0}`.
    pub fn to_literal(&self) -> String {
        let items: Vec<String> = self
            .iter()
            .map(|(lang, pct)| format!("'{}': {:?}", lang, pct))
            .collect();
        format!("{{{}}}", items.join(", "))
    }

    /// Single-line text for a spreadsheet cell or log line.
    pub fn render(&self, format: ResultFormat) -> Result<String> {
        Ok(match format {
            ResultFormat::Json => serde_json::to_string(self)?,
            ResultFormat::Literal => self.to_literal(),
        })
    }
}

impl Serialize for LanguageDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (lang, pct) in &self.0 {
            map.serialize_entry(lang, pct)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistVisitor;

        impl<'de> Visitor<'de> for DistVisitor {
            type Value = LanguageDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language code to percentage")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = LanguageDistribution::new();
                while let Some((lang, pct)) = access.next_entry::<String, f64>()? {
                    dist.insert(lang, pct);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Is Scanned")]
    pub is_scanned: bool,
    #[serde(rename = "Dominant Language")]
    pub dominant_language: Option<String>,
    #[serde(rename = "Language Distribution")]
    pub language_distribution: LanguageDistribution,
}

impl AnalysisResult {
    /// Key/value literal text; not guaranteed to parse as JSON.
    pub fn to_literal(&self) -> String {
        let dominant = match &self.dominant_language {
            Some(lang) => format!("'{}'", lang),
            None => "None".to_string(),
        };
        format!(
            "{{'Is Scanned': {}, 'Dominant Language': {}, 'Language Distribution': {}}}",
            if self.is_scanned { "True" } else { "False" },
            dominant,
            self.language_distribution.to_literal()
        )
    }

    pub fn render(&self, format: ResultFormat) -> Result<String> {
        Ok(match format {
            ResultFormat::Json => serde_json::to_string_pretty(self)?,
            ResultFormat::Literal => self.to_literal(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub filename: String,
    /// 1-based manifest row.
    pub document_number: usize,
    pub dominant_language: Option<String>,
    pub language_distribution: LanguageDistribution,
    pub is_scanned: bool,
}

impl BatchRecord {
    pub fn new(filename: &str, document_number: usize, result: &AnalysisResult) -> Self {
        Self {
            filename: filename.to_string(),
            document_number,
            dominant_language: result.dominant_language.clone(),
            language_distribution: result.language_distribution.clone(),
            is_scanned: result.is_scanned,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub analyzed: usize,
    pub skipped: usize,
    pub checkpoint: Option<String>,
}
