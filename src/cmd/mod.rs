//! Command module structure for the ohmbudsman CLI

use anyhow::Result;
use std::path::Path;

use ohmbudsman::config::{Config, Credentials};
use ohmbudsman::pipeline::StageObserver;
use ohmbudsman::ui::{self, Stage};

pub mod assets;
pub mod derive;
pub mod fetch;
pub mod generate;
pub mod init;
pub mod lint;
pub mod publish;
pub mod render;
pub mod run;
pub mod util;

/// Load configuration from `--config` or the default locations, then
/// apply the READWISE_TAG override.
pub fn load_config(config_path: Option<&Path>, credentials: &Credentials) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_with(path)?,
        None => Config::load()?,
    };
    Ok(config.with_tag(credentials.readwise_tag.clone()))
}

/// Prints `[stage] detail` lines as the pipeline advances.
pub struct ConsoleObserver;

impl StageObserver for ConsoleObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::debug!(stage = stage.label(), "stage started");
    }

    fn stage_finished(&self, stage: Stage, detail: &str) {
        ui::success(&format!("{} {}", ui::stage_tag(stage), detail));
    }
}
