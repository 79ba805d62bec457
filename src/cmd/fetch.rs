//! `ohmbudsman fetch`: pull recent Reader documents into articles.json.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use std::path::Path;

use ohmbudsman::config::{Config, Credentials};
use ohmbudsman::http;
use ohmbudsman::paths::ARTICLES_FILE;
use ohmbudsman::source::{save_articles, Article, ArticleSource, ReadwiseSource};
use ohmbudsman::ui::{self, colors, format, Stage};

pub fn cmd_fetch(
    config_path: Option<&Path>,
    out: Option<&Path>,
    tag: Option<String>,
    hours: Option<u32>,
) -> Result<()> {
    let credentials = Credentials::from_env();
    let mut config = super::load_config(config_path, &credentials)?.with_tag(tag);
    if let Some(hours) = hours {
        config.readwise.lookback_hours = hours;
    }

    let articles = fetch_articles(&config, &credentials)?;
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir().join(ARTICLES_FILE));
    save_articles(&path, &articles)?;

    ui::success(&format!(
        "{} Saved {} to {}",
        ui::stage_tag(Stage::Fetch),
        format::plural(articles.len(), "article"),
        colors::identifier(&path.display().to_string())
    ));
    Ok(())
}

/// Fetch the lookback window from Readwise; an empty result is an error.
pub fn fetch_articles(config: &Config, credentials: &Credentials) -> Result<Vec<Article>> {
    let source = ReadwiseSource::new(
        config.readwise.clone(),
        credentials.readwise_token()?,
        http::agent(config.http.timeout_secs),
    );
    let hours = config.readwise.lookback_hours;
    let cutoff = Utc::now() - Duration::hours(i64::from(hours));

    let spinner = ui::spinner(&format!("Fetching {} from Readwise", source.describe()));
    let result = source.fetch(cutoff);
    spinner.finish_and_clear();

    let articles = result?;
    if articles.is_empty() {
        return Err(anyhow!(
            "No articles tagged {} in past {} h",
            source.describe(),
            hours
        ));
    }
    Ok(articles)
}
