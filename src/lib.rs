//! # Ohmbudsman - daily Disguised-SNAP digests
//!
//! Pulls tagged articles from Readwise Reader, has a language model condense
//! them into a nine-section Disguised-SNAP digest, checks the result with a
//! structural linter and leaves a draft email in Buttondown.
//!
//! ## Stages
//!
//! Every stage sits behind a narrow trait so variants can be swapped
//! without touching the orchestration:
//!
//! - [`source::ArticleSource`] - produces article records
//! - [`summarize::Summarizer`] - maps article records to digest text
//! - [`publish::Publisher`] - takes digest text, returns a receipt
//!
//! [`pipeline::Pipeline`] runs them in sequence and gates publication on
//! [`lint::lint_snap_with`]. [`assets::AssetChain`] then turns a written
//! digest into a PDF, social snippets, a podcast script with optional audio,
//! and a row in the content index.
//!
//! ## Example
//!
//! ```
//! use ohmbudsman::lint::{lint_snap, LintError};
//!
//! let mut digest: Vec<String> = (1..=9).map(|i| format!("# Section {}", i)).collect();
//! digest.push("- 📰 First bullet.".to_string());
//! assert!(lint_snap(&digest.join("\n")).is_ok());
//!
//! digest.push("# Extra".to_string());
//! assert_eq!(
//!     lint_snap(&digest.join("\n")),
//!     Err(LintError::HeadingCountMismatch { expected: 9, found: 10 })
//! );
//! ```

pub mod assets;
pub mod audio;
pub mod config;
pub mod derive;
pub mod digest;
pub mod http;
pub mod lint;
pub mod metadata;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod publish;
pub mod render;
pub mod source;
pub mod summarize;
pub mod ui;
pub mod validation;

/// Default path constants for the ohmbudsman directory structure.
pub mod paths {
    /// Project directory: `.ohmbudsman`
    pub const PROJECT_DIR: &str = ".ohmbudsman";
    /// Project config file: `.ohmbudsman/config.md`
    pub const CONFIG_FILE: &str = ".ohmbudsman/config.md";
    /// Directory containing prompt templates: `.ohmbudsman/prompts`
    pub const PROMPTS_DIR: &str = ".ohmbudsman/prompts";
    /// File name of the assembled digest inside the output directory
    pub const DIGEST_FILE: &str = "digest_output.md";
    /// File name of the fetched article list inside the output directory
    pub const ARTICLES_FILE: &str = "articles.json";
    /// Directory for social snippets: `outputs/social`
    pub const SOCIAL_DIR: &str = "outputs/social";
    /// Directory for podcast scripts: `outputs/podcasts`
    pub const PODCASTS_DIR: &str = "outputs/podcasts";
    /// Content index with one row per digest: `metadata/content_index.csv`
    pub const CONTENT_INDEX: &str = "metadata/content_index.csv";
}

/// Format a UTC timestamp the way Readwise expects it: `YYYY-MM-DDTHH:MM:SS.ffffffZ`
pub fn iso_utc(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Calendar date in `YYYY-MM-DD` form.
pub fn iso_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
