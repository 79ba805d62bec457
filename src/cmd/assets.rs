//! `ohmbudsman assets`, `audio` and `metadata`: the post-digest chain.

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

use ohmbudsman::assets::AssetChain;
use ohmbudsman::audio::{synthesize_script, ElevenLabsSynthesizer, Synthesizer};
use ohmbudsman::config::{Config, Credentials, ELEVENLABS_API_KEY_ENV};
use ohmbudsman::derive::Deriver;
use ohmbudsman::http;
use ohmbudsman::metadata::{append_row, IndexRow};
use ohmbudsman::paths::{CONTENT_INDEX, PODCASTS_DIR, PROMPTS_DIR};
use ohmbudsman::prompt::{self, PODCAST_PROMPT, SOCIAL_PROMPT};
use ohmbudsman::provider::create_provider;
use ohmbudsman::ui::{self, colors, Stage};

use super::derive::DERIVE_TEMPERATURE;
use super::ConsoleObserver;

pub fn cmd_assets(config_path: Option<&Path>, file: &Path, no_audio: bool) -> Result<()> {
    let credentials = Credentials::from_env();
    let config = super::load_config(config_path, &credentials)?;
    let provider = create_provider(&config, &credentials)?;
    let prompts_dir = Path::new(PROMPTS_DIR);
    let social_prompt = prompt::assemble(SOCIAL_PROMPT, prompts_dir, &config.lint)?;
    let podcast_prompt = prompt::assemble(PODCAST_PROMPT, prompts_dir, &config.lint)?;

    let synthesizer = if no_audio {
        None
    } else {
        match &credentials.elevenlabs_api_key {
            Some(key) => Some(elevenlabs(&config, key)),
            None => {
                ui::warn(&format!("{} not set; skipping audio", ELEVENLABS_API_KEY_ENV));
                None
            }
        }
    };

    let deriver = Deriver::new(provider.as_ref(), config.provider.model.clone(), DERIVE_TEMPERATURE);
    let mut chain = AssetChain::new(
        &deriver,
        config.render.clone(),
        config.lint.clone(),
        social_prompt,
        podcast_prompt,
    );
    chain.synthesizer = synthesizer.as_ref().map(|s| s as &dyn Synthesizer);
    chain.observer = &ConsoleObserver;

    let report = chain.run(file, &ohmbudsman::iso_date(Utc::now()))?;
    ui::success(&format!(
        "Assets for {} indexed in {}",
        colors::identifier(&file.display().to_string()),
        report.index.display()
    ));
    Ok(())
}

pub fn cmd_audio(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let credentials = Credentials::from_env();
    let key = credentials.elevenlabs_api_key()?;
    let config = super::load_config(config_path, &credentials)?;
    let synthesizer = elevenlabs(&config, key);

    let spinner = ui::spinner(&format!("Synthesizing {}", file.display()));
    let result = synthesize_script(&synthesizer, file, Path::new(PODCASTS_DIR));
    spinner.finish_and_clear();

    let files = result?;
    ui::success(&format!(
        "{} audio saved to {}",
        ui::stage_tag(Stage::Audio),
        colors::identifier(&files.mp3.display().to_string())
    ));
    Ok(())
}

pub fn cmd_metadata(
    config_path: Option<&Path>,
    file: &Path,
    pdf: &Path,
    social: &Path,
    audio: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path, &Credentials::default())?;
    let row = IndexRow::for_digest(
        file,
        pdf,
        audio,
        social,
        &config.render.version,
        &ohmbudsman::iso_date(Utc::now()),
    )?;
    let index = PathBuf::from(CONTENT_INDEX);
    append_row(&index, &row)?;
    ui::success(&format!(
        "{} {} added to {}",
        ui::stage_tag(Stage::Metadata),
        colors::identifier(&row.title),
        index.display()
    ));
    Ok(())
}

fn elevenlabs(config: &Config, key: &str) -> ElevenLabsSynthesizer {
    ElevenLabsSynthesizer::new(
        config.audio.clone(),
        key,
        http::agent(config.http.timeout_secs),
    )
}
