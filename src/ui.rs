//! Centralized UI formatting and color utilities
//!
//! Status lines printed by the CLI go through here so quiet mode and the
//! icon set stay consistent across commands.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Environment variable that silences non-essential output.
pub const QUIET_ENV: &str = "OHMBUDSMAN_QUIET";

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var(QUIET_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Pipeline stage shown in progress lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Summarize,
    Lint,
    Write,
    Publish,
    Render,
    Snippets,
    Podcast,
    Audio,
    Metadata,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Summarize => "summarize",
            Stage::Lint => "lint",
            Stage::Write => "write",
            Stage::Publish => "publish",
            Stage::Render => "render",
            Stage::Snippets => "snippets",
            Stage::Podcast => "podcast",
            Stage::Audio => "audio",
            Stage::Metadata => "metadata",
        }
    }
}

/// Returns a colored stage tag, e.g. `[fetch]` in cyan.
pub fn stage_tag(stage: Stage) -> ColoredString {
    format!("[{}]", stage.label()).cyan()
}

/// Print `→ message` unless quiet.
pub fn step(message: &str) {
    if !is_quiet() {
        println!("{} {}", "→".cyan(), message);
    }
}

/// Print `✓ message` unless quiet.
pub fn success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print `⚠ message` to stderr. Warnings are shown even in quiet mode.
pub fn warn(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Print `✗ message` to stderr.
pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Spinner shown while a long call runs. Hidden in quiet mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Cyan for identifiers (paths, draft ids)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }
}

/// Common text formatting patterns
pub mod format {
    /// Truncate text to `max_chars` characters, appending `...` when cut.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }

    /// `1 article` / `3 articles`
    pub fn plural(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{} {}", count, noun)
        } else {
            format!("{} {}s", count, noun)
        }
    }
}
