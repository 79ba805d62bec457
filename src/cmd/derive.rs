//! `ohmbudsman snippets` and `ohmbudsman podcast`: assets derived from a digest.

use anyhow::Result;
use std::path::{Path, PathBuf};

use ohmbudsman::config::Credentials;
use ohmbudsman::derive::Deriver;
use ohmbudsman::paths::{PODCASTS_DIR, PROMPTS_DIR, SOCIAL_DIR};
use ohmbudsman::prompt::{self, PODCAST_PROMPT, SOCIAL_PROMPT};
use ohmbudsman::provider::create_provider;
use ohmbudsman::ui::{self, colors};

/// Derived assets use a slightly warmer temperature than the digest.
pub(crate) const DERIVE_TEMPERATURE: f32 = 0.4;

pub fn cmd_snippets(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let path = with_deriver(config_path, SOCIAL_PROMPT, |deriver, prompt| {
        deriver.create_snippets(file, prompt, Path::new(SOCIAL_DIR))
    })?;
    ui::success(&format!(
        "Social snippets saved to {}",
        colors::identifier(&path.display().to_string())
    ));
    Ok(())
}

pub fn cmd_podcast(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let path = with_deriver(config_path, PODCAST_PROMPT, |deriver, prompt| {
        deriver.podcast_script(file, prompt, Path::new(PODCASTS_DIR))
    })?;
    ui::success(&format!(
        "Podcast script saved to {}",
        colors::identifier(&path.display().to_string())
    ));
    Ok(())
}

fn with_deriver(
    config_path: Option<&Path>,
    prompt_name: &str,
    f: impl FnOnce(&Deriver, &str) -> Result<PathBuf>,
) -> Result<PathBuf> {
    let credentials = Credentials::from_env();
    let config = super::load_config(config_path, &credentials)?;
    let provider = create_provider(&config, &credentials)?;
    let system = prompt::assemble(prompt_name, Path::new(PROMPTS_DIR), &config.lint)?;

    let deriver = Deriver::new(provider.as_ref(), config.provider.model.clone(), DERIVE_TEMPERATURE);
    let spinner = ui::spinner(&format!("Generating {} with {}", prompt_name, config.provider.model));
    let result = f(&deriver, &system);
    spinner.finish_and_clear();
    result
}
