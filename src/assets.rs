//! Everything made from a finished digest, in order: PDF, social snippets,
//! podcast script, audio and a content index row.
//!
//! The first failing step ends the chain; files already written stay.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::audio::{synthesize_script, AudioFiles, Synthesizer};
use crate::config::RenderConfig;
use crate::derive::Deriver;
use crate::lint::LintRules;
use crate::metadata::{append_row, IndexRow};
use crate::paths::{CONTENT_INDEX, PODCASTS_DIR, SOCIAL_DIR};
use crate::pipeline::{Silent, StageObserver};
use crate::render::render_pdf;
use crate::ui::Stage;

/// Paths produced by one pass of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub pdf: PathBuf,
    pub social: PathBuf,
    pub script: PathBuf,
    /// `None` when no synthesizer was configured
    pub audio: Option<AudioFiles>,
    pub index: PathBuf,
}

pub struct AssetChain<'a> {
    pub deriver: &'a Deriver<'a>,
    pub render: RenderConfig,
    pub lint: LintRules,
    pub social_prompt: String,
    pub podcast_prompt: String,
    /// `None` skips audio
    pub synthesizer: Option<&'a dyn Synthesizer>,
    pub social_dir: PathBuf,
    pub podcasts_dir: PathBuf,
    pub index_path: PathBuf,
    pub observer: &'a dyn StageObserver,
}

impl<'a> AssetChain<'a> {
    pub fn new(
        deriver: &'a Deriver<'a>,
        render: RenderConfig,
        lint: LintRules,
        social_prompt: impl Into<String>,
        podcast_prompt: impl Into<String>,
    ) -> Self {
        Self {
            deriver,
            render,
            lint,
            social_prompt: social_prompt.into(),
            podcast_prompt: podcast_prompt.into(),
            synthesizer: None,
            social_dir: PathBuf::from(SOCIAL_DIR),
            podcasts_dir: PathBuf::from(PODCASTS_DIR),
            index_path: PathBuf::from(CONTENT_INDEX),
            observer: &Silent,
        }
    }

    /// Build every asset for the digest at `md_path`, stamping `date`.
    pub fn run(&self, md_path: &Path, date: &str) -> Result<AssetReport> {
        self.observer.stage_started(Stage::Render);
        let pdf = render_pdf(md_path, &self.render, &self.lint, date).context("Render failed")?;
        self.observer
            .stage_finished(Stage::Render, &pdf.display().to_string());

        self.observer.stage_started(Stage::Snippets);
        let social = self
            .deriver
            .create_snippets(md_path, &self.social_prompt, &self.social_dir)
            .context("Snippets failed")?;
        self.observer
            .stage_finished(Stage::Snippets, &social.display().to_string());

        self.observer.stage_started(Stage::Podcast);
        let script = self
            .deriver
            .podcast_script(md_path, &self.podcast_prompt, &self.podcasts_dir)
            .context("Podcast script failed")?;
        self.observer
            .stage_finished(Stage::Podcast, &script.display().to_string());

        let audio = match self.synthesizer {
            Some(synthesizer) => {
                self.observer.stage_started(Stage::Audio);
                let files = synthesize_script(synthesizer, &script, &self.podcasts_dir)
                    .context("Audio synthesis failed")?;
                self.observer
                    .stage_finished(Stage::Audio, &files.mp3.display().to_string());
                Some(files)
            }
            None => {
                tracing::info!("no synthesizer; skipping audio");
                None
            }
        };

        self.observer.stage_started(Stage::Metadata);
        let row = IndexRow::for_digest(
            md_path,
            &pdf,
            audio.as_ref().map(|files| files.mp3.as_path()),
            &social,
            &self.render.version,
            date,
        )?;
        append_row(&self.index_path, &row)?;
        self.observer
            .stage_finished(Stage::Metadata, &self.index_path.display().to_string());

        Ok(AssetReport {
            pdf,
            social,
            script,
            audio,
            index: self.index_path.clone(),
        })
    }
}
