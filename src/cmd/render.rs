//! `ohmbudsman render`: digest to PDF.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use ohmbudsman::config::Credentials;
use ohmbudsman::render::render_pdf;
use ohmbudsman::ui::{self, colors, Stage};

pub fn cmd_render(config_path: Option<&Path>, file: &Path, out_dir: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path, &Credentials::default())?;
    if let Some(dir) = out_dir {
        config.render.output_dir = dir.to_string_lossy().to_string();
    }

    let spinner = ui::spinner(&format!("Rendering {} with {}", file.display(), config.render.pandoc));
    let result = render_pdf(
        file,
        &config.render,
        &config.lint,
        &ohmbudsman::iso_date(Utc::now()),
    );
    spinner.finish_and_clear();

    let pdf = result?;
    ui::success(&format!(
        "{} PDF written to {}",
        ui::stage_tag(Stage::Render),
        colors::identifier(&pdf.display().to_string())
    ));
    Ok(())
}
