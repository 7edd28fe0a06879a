use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One manifest row; columns other than `filename` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Document name without the `.pdf` extension.
    pub filename: String,
}

impl ManifestEntry {
    pub fn pdf_path(&self, input_folder: &Path) -> PathBuf {
        input_folder.join(format!("{}.pdf", self.filename))
    }
}

pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening manifest: {}", path.display()))?;
    parse_manifest(file).with_context(|| format!("parsing manifest: {}", path.display()))
}

pub fn parse_manifest<R: Read>(reader: R) -> Result<Vec<ManifestEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().with_context(|| "reading header row")?;
    if !headers.iter().any(|h| h == "filename") {
        anyhow::bail!("manifest has no `filename` column");
    }

    let mut entries = Vec::new();
    for (i, row) in rdr.deserialize::<ManifestEntry>().enumerate() {
        let entry = row.with_context(|| format!("manifest row {}", i + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}
