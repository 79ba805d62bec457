//! PDF rendering through pandoc.

use anyhow::{anyhow, Context, Result};
use sha2::{Digest as _, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::RenderConfig;
use crate::digest::body_of;
use crate::lint::{lint_snap_with, LintRules};

/// Hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Provenance footer appended before rendering.
pub fn footer(date: &str, version: &str, sha: &str) -> String {
    format!(
        "\n\n---\nGenerated {} | version {} | SHA256 {}\n",
        date, version, sha
    )
}

/// Render `markdown_path` to `<output_dir>/<stem>.pdf`.
///
/// The body is linted first; a violation aborts before pandoc runs.
pub fn render_pdf(
    markdown_path: &Path,
    config: &RenderConfig,
    rules: &LintRules,
    date: &str,
) -> Result<PathBuf> {
    if !markdown_path.exists() {
        return Err(anyhow!("Markdown file not found: {}", markdown_path.display()));
    }
    let source = fs::read(markdown_path)
        .with_context(|| format!("Failed to read {}", markdown_path.display()))?;
    let text = String::from_utf8(source.clone())
        .with_context(|| format!("{} is not valid UTF-8", markdown_path.display()))?;

    lint_snap_with(body_of(&text), rules)
        .with_context(|| format!("Lint failed for {}", markdown_path.display()))?;

    let out_dir = PathBuf::from(&config.output_dir);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create directory {}", out_dir.display()))?;

    let stem = markdown_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("digest");
    let pdf_path = out_dir.join(format!("{}.pdf", stem));

    // Removed when dropped, including on the error paths below
    let mut staged = tempfile::Builder::new()
        .prefix(&format!("{}_", stem))
        .suffix(".md")
        .tempfile_in(&out_dir)
        .context("Failed to create temporary markdown file")?;
    staged.write_all(text.as_bytes())?;
    staged.write_all(footer(date, &config.version, &sha256_hex(&source)).as_bytes())?;
    staged.flush()?;

    tracing::info!(
        pandoc = %config.pandoc,
        engine = %config.pdf_engine,
        out = %pdf_path.display(),
        "rendering PDF"
    );
    let output = Command::new(&config.pandoc)
        .arg(staged.path())
        .arg(format!("--pdf-engine={}", config.pdf_engine))
        .arg("-o")
        .arg(&pdf_path)
        .output()
        .with_context(|| format!("Failed to run {}", config.pandoc))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} exited with {}: {}",
            config.pandoc,
            output.status,
            stderr.trim()
        ));
    }

    Ok(pdf_path)
}
