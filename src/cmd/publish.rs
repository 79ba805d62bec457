//! `ohmbudsman publish`: create a Buttondown draft from a digest file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use ohmbudsman::config::Credentials;
use ohmbudsman::digest::{split_front_matter, subject_for};
use ohmbudsman::http;
use ohmbudsman::lint::lint_snap_with;
use ohmbudsman::publish::{ButtondownPublisher, Publisher};
use ohmbudsman::ui::{self, colors, Stage};

pub fn cmd_publish(config_path: Option<&Path>, file: &Path, subject: Option<String>) -> Result<()> {
    let credentials = Credentials::from_env();
    let config = super::load_config(config_path, &credentials)?;
    let token = credentials.buttondown_token()?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read digest from {}", file.display()))?;
    let (front, body) = split_front_matter(&content);
    lint_snap_with(body, &config.lint)
        .with_context(|| format!("{} failed lint; not publishing", file.display()))?;

    let subject = match subject {
        Some(subject) => subject,
        None => default_subject(front, &config.digest.title),
    };

    let publisher = ButtondownPublisher::new(
        config.buttondown.clone(),
        token,
        http::agent(config.http.timeout_secs),
    );
    let receipt = publisher.publish(&subject, &content)?;

    ui::success(&format!(
        "{} Buttondown {} created: {}",
        ui::stage_tag(Stage::Publish),
        receipt.status,
        colors::identifier(receipt.id.as_deref().unwrap_or("(no id)"))
    ));
    Ok(())
}

/// Subject from the front matter `title`, else `<title> — <today>`.
fn default_subject(front: Option<&str>, title: &str) -> String {
    front
        .and_then(|yaml| serde_yaml::from_str::<serde_yaml::Value>(yaml).ok())
        .and_then(|value| value.get("title").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| subject_for(title, &ohmbudsman::iso_date(chrono::Utc::now())))
}
