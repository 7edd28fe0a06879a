use crate::{config::ResultFormat, report::BatchRecord, util::ensure_dir};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const COLUMNS: [&str; 5] = [
    "Filename",
    "Document Number",
    "Dominant Language",
    "Language Distribution",
    "Is Scanned",
];

/// Cell values of one checkpoint row.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRow {
    pub filename: String,
    pub document_number: f64,
    /// Empty when no language was detected.
    pub dominant_language: String,
    /// Compact JSON object, or the literal mapping text.
    pub language_distribution: String,
    pub is_scanned: bool,
}

impl CheckpointRow {
    pub fn from_record(record: &BatchRecord, format: ResultFormat) -> Result<Self> {
        Ok(Self {
            filename: record.filename.clone(),
            document_number: record.document_number as f64,
            dominant_language: record.dominant_language.clone().unwrap_or_default(),
            language_distribution: record.language_distribution.render(format)?,
            is_scanned: record.is_scanned,
        })
    }
}

pub fn rows(records: &[BatchRecord], format: ResultFormat) -> Result<Vec<CheckpointRow>> {
    records
        .iter()
        .map(|r| CheckpointRow::from_record(r, format))
        .collect()
}

/// Write `records` to a fresh workbook at `path`, replacing any existing file.
pub fn write_checkpoint(path: &Path, records: &[BatchRecord], format: ResultFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in rows(records, format)?.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.filename)?;
        sheet.write_number(r, 1, row.document_number)?;
        if !row.dominant_language.is_empty() {
            sheet.write_string(r, 2, &row.dominant_language)?;
        }
        sheet.write_string(r, 3, &row.language_distribution)?;
        sheet.write_boolean(r, 4, row.is_scanned)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing checkpoint: {}", path.display()))?;
    Ok(())
}
