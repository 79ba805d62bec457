//! Digest assembly: front matter, subject line and output file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DigestConfig;
use crate::paths::DIGEST_FILE;

/// Section labels of the Disguised-SNAP template, in order.
pub const SNAP_LABELS: [&str; 9] = [
    "HEADLINE", "NUTSHELL", "HOOK", "TAKEAWAY", "LINKS", "MOMENTUM", "QUESTION", "OUTLOOK", "CTA",
];

/// A dated digest body ready for publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub title: String,
    pub author: String,
    pub license: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    /// Markdown body without front matter
    pub body: String,
}

impl Digest {
    pub fn new(settings: &DigestConfig, at: DateTime<Utc>, body: impl Into<String>) -> Self {
        Self {
            title: settings.title.clone(),
            author: settings.author.clone(),
            license: settings.license.clone(),
            date: crate::iso_date(at),
            body: body.into(),
        }
    }

    /// Email subject, e.g. `Ohmbudsman Digest — 2026-10-17`
    pub fn subject(&self) -> String {
        subject_for(&self.title, &self.date)
    }

    /// Full Markdown document with YAML front matter.
    ///
    /// String fields are double-quoted so configured values containing
    /// `: `, `#` or quotes stay scalar.
    pub fn to_markdown(&self) -> String {
        format!(
            "---\ntitle: {}\ndate: {}\nauthor: {}\nlicense: {}\n---\n\n{}",
            yaml_quoted(&self.subject()),
            self.date,
            yaml_quoted(&self.author),
            yaml_quoted(&self.license),
            self.body
        )
    }

    /// Write `digest_output.md` into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(DIGEST_FILE);
        fs::write(&path, self.to_markdown())
            .with_context(|| format!("Failed to write digest to {}", path.display()))?;
        Ok(path)
    }
}

/// A YAML double-quoted scalar.
fn yaml_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `<title> — <date>`
pub fn subject_for(title: &str, date: &str) -> String {
    format!("{} — {}", title, date)
}

/// Split a leading `---` fenced YAML block from a Markdown document.
///
/// Returns `(Some(front_matter), body)` when the first line is `---` and a
/// closing `---` line follows; otherwise `(None, content)`.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(&['\r', '\n'][..]);
            return (Some(front), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Body of a digest file with any front matter removed.
pub fn body_of(content: &str) -> &str {
    split_front_matter(content).1
}

/// Read a digest file and return its body.
pub fn read_body(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read digest from {}", path.display()))?;
    Ok(body_of(&content).to_string())
}
