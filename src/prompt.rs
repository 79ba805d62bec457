//! Prompt template management.
//!
//! Built-in prompts can be replaced by dropping a Markdown file with the
//! same name into `.ohmbudsman/prompts/`. Templates are rendered with tera
//! and see the lint thresholds, so the model is asked for exactly what the
//! linter will check.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tera::Tera;

use crate::digest::{split_front_matter, SNAP_LABELS};
use crate::lint::LintRules;

/// Name of the digest summarization prompt.
pub const SNAP_PROMPT: &str = "snap";
/// Name of the social snippet prompt.
pub const SOCIAL_PROMPT: &str = "social";
/// Name of the podcast script prompt.
pub const PODCAST_PROMPT: &str = "podcast";
/// Name of the per-chunk notes prompt used when articles span several requests.
pub const NOTES_PROMPT: &str = "notes";

const SNAP_TEMPLATE: &str = r##"You are an expert newsletter writer. Produce a DAILY DIGEST in strict Disguised-SNAP markdown.

Rules:
- Write exactly {{ headings }} top-level headings, one per label, in this order: {{ labels | join(sep=", ") }}.
- Write each heading as "# LABEL". Use no other single-# headings.
- Keep every sentence to {{ max_words }} words or fewer.
- Start every bullet with "- " and put exactly {{ emoji }} emoji in it.
- Keep every bullet to {{ max_bullet_words }} words or fewer.
- Do NOT shorten labels or remove them.
"##;

const SOCIAL_TEMPLATE: &str = r#"Extract 3-5 short insight capsules (<=280 chars each), a LinkedIn summary, and one Mastodon caption from the following markdown. Respond in JSON with keys 'insights', 'linkedin', 'mastodon'."#;

const NOTES_TEMPLATE: &str = r#"You are preparing research notes for a newsletter editor. For every article in the JSON list, write one plain line: the title, the link and the single most important fact. Use no headings, no bullets and no emoji."#;

const PODCAST_TEMPLATE: &str = r#"Compress the following digest into a 500-700 word podcast script. Write in a concise, conversational tone."#;

/// Built-in template for a prompt name, if any.
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        SNAP_PROMPT => Some(SNAP_TEMPLATE),
        SOCIAL_PROMPT => Some(SOCIAL_TEMPLATE),
        PODCAST_PROMPT => Some(PODCAST_TEMPLATE),
        NOTES_PROMPT => Some(NOTES_TEMPLATE),
        _ => None,
    }
}

/// Load a template: `<prompts_dir>/<name>.md` when present, else the built-in.
pub fn load_template(name: &str, prompts_dir: &Path) -> Result<String> {
    let path = prompts_dir.join(format!("{}.md", name));
    if path.exists() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "using prompt override");
        return Ok(split_front_matter(&content).1.to_string());
    }

    builtin(name)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Prompt '{}' not found in {}", name, prompts_dir.display()))
}

/// Render a template with the digest variables.
pub fn render(template: &str, rules: &LintRules) -> Result<String> {
    let mut context = tera::Context::new();
    context.insert("labels", &SNAP_LABELS);
    context.insert("headings", &rules.headings);
    context.insert("max_words", &rules.max_sentence_words);
    context.insert("max_bullet_words", &rules.max_bullet_words);
    context.insert("emoji", &rules.emoji_per_bullet);

    Tera::one_off(template, &context, false).context("Failed to render prompt template")
}

/// Load and render a prompt in one step.
pub fn assemble(name: &str, prompts_dir: &Path, rules: &LintRules) -> Result<String> {
    let template = load_template(name, prompts_dir)?;
    render(&template, rules)
}

/// Built-in SNAP prompt file written by `ohmbudsman init`.
pub fn default_snap_file() -> String {
    format!(
        "---\nname: snap\npurpose: Disguised-SNAP digest summarization\n---\n\n{}",
        SNAP_TEMPLATE
    )
}
