//! `ohmbudsman generate`: summarize articles into digest_output.md.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use ohmbudsman::config::{Config, Credentials};
use ohmbudsman::digest::Digest;
use ohmbudsman::lint::lint_snap_with;
use ohmbudsman::paths::PROMPTS_DIR;
use ohmbudsman::prompt;
use ohmbudsman::provider::{create_provider, ModelProvider};
use ohmbudsman::source::load_articles;
use ohmbudsman::summarize::{ModelSummarizer, Summarizer};
use ohmbudsman::ui::{self, colors, Stage};

pub fn cmd_generate(
    config_path: Option<&Path>,
    articles_path: Option<&Path>,
    out: Option<&Path>,
    no_lint: bool,
) -> Result<()> {
    let credentials = Credentials::from_env();
    let config = super::load_config(config_path, &credentials)?;

    let articles = match articles_path {
        Some(path) => load_articles(path)?,
        None => super::fetch::fetch_articles(&config, &credentials)?,
    };
    ui::step(&format!(
        "{} {} articles",
        ui::stage_tag(Stage::Summarize),
        articles.len()
    ));

    let provider = create_provider(&config, &credentials)?;
    let body = summarize_with(provider.as_ref(), &config, |summarizer| {
        summarizer.summarize(&articles)
    })?;

    if no_lint {
        ui::warn("Lint skipped (--no-lint)");
    } else {
        lint_snap_with(&body, &config.lint).context("Generated digest failed lint")?;
        ui::success(&format!("{} structure ok", ui::stage_tag(Stage::Lint)));
    }

    let out_dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir());
    let digest = Digest::new(&config.digest, Utc::now(), body);
    let path = digest.write_to(&out_dir)?;
    ui::success(&format!(
        "{} Saved {}",
        ui::stage_tag(Stage::Write),
        colors::identifier(&path.display().to_string())
    ));
    Ok(())
}

/// Build a summarizer from config and run `f` with it under a spinner.
pub fn summarize_with<T>(
    provider: &dyn ModelProvider,
    config: &Config,
    f: impl FnOnce(&dyn Summarizer) -> Result<T>,
) -> Result<T> {
    let prompts_dir = Path::new(PROMPTS_DIR);
    let system_prompt = prompt::assemble(&config.provider.prompt, prompts_dir, &config.lint)?;
    let notes_prompt = prompt::assemble(prompt::NOTES_PROMPT, prompts_dir, &config.lint)?;

    let spinner = ui::spinner(&format!(
        "Summarizing with {} ({})",
        config.provider.model,
        provider.name()
    ));
    let on_line = |line: &str| spinner.set_message(ui::format::truncate(line, 60));
    let summarizer = ModelSummarizer::new(
        provider,
        config.provider.model.clone(),
        config.provider.temperature,
        system_prompt,
        config.provider.max_chunk_tokens,
    )
    .with_notes_prompt(notes_prompt)
    .with_progress(&on_line);

    let result = f(&summarizer);
    spinner.finish_and_clear();
    result
}
