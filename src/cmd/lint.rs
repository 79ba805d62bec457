//! `ohmbudsman lint`: structural check of a digest file.

use anyhow::{anyhow, Result};
use std::path::Path;

use ohmbudsman::config::Credentials;
use ohmbudsman::digest::read_body;
use ohmbudsman::lint::lint_snap_with;
use ohmbudsman::ui::{self, colors};

/// Lint `file` (front matter skipped) with the configured rules.
pub fn cmd_lint(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path, &Credentials::default())?;
    let body = read_body(file)?;

    match lint_snap_with(&body, &config.lint) {
        Ok(()) => {
            ui::success(&format!(
                "{} Disguised-SNAP structure ok",
                colors::identifier(&file.display().to_string())
            ));
            Ok(())
        }
        Err(err) => {
            tracing::debug!(rule = err.rule(), "lint violation");
            Err(anyhow!("{}: [{}] {}", file.display(), err.rule(), err))
        }
    }
}
