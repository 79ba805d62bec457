//! Content index: one CSV row per digest with its derived assets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::render::sha256_hex;

/// A row of `metadata/content_index.csv`. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    pub date: String,
    pub title: String,
    pub pdf_path: String,
    /// Empty when no audio was made
    pub podcast_path: String,
    pub social_path: String,
    /// SHA-256 of the digest markdown
    pub sha256: String,
    pub version: String,
}

impl IndexRow {
    /// Describe the digest at `md_path`; the title is the file stem.
    pub fn for_digest(
        md_path: &Path,
        pdf: &Path,
        podcast: Option<&Path>,
        social: &Path,
        version: &str,
        date: &str,
    ) -> Result<Self> {
        let bytes = fs::read(md_path)
            .with_context(|| format!("Failed to read digest {}", md_path.display()))?;
        Ok(Self {
            date: date.to_string(),
            title: md_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
            pdf_path: pdf.display().to_string(),
            podcast_path: podcast.map(|p| p.display().to_string()).unwrap_or_default(),
            social_path: social.display().to_string(),
            sha256: sha256_hex(&bytes),
            version: version.to_string(),
        })
    }
}

/// Append `row` to the index, writing the header only when the file is new or empty.
pub fn append_row(index_path: &Path, row: &IndexRow) -> Result<()> {
    let has_rows = fs::metadata(index_path)
        .map(|m| m.len() > 0)
        .unwrap_or(false);
    if let Some(parent) = index_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(index_path)
        .with_context(|| format!("Failed to open {}", index_path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(!has_rows)
        .from_writer(file);
    writer
        .serialize(row)
        .with_context(|| format!("Failed to append to {}", index_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    tracing::info!(path = %index_path.display(), title = %row.title, "content index updated");
    Ok(())
}
