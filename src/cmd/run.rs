//! `ohmbudsman run`: the whole pipeline in one command.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use ohmbudsman::config::Credentials;
use ohmbudsman::http;
use ohmbudsman::paths::ARTICLES_FILE;
use ohmbudsman::pipeline::Pipeline;
use ohmbudsman::provider::create_provider;
use ohmbudsman::publish::{ButtondownPublisher, Publisher};
use ohmbudsman::source::ReadwiseSource;
use ohmbudsman::ui::{self, colors};

use super::ConsoleObserver;

pub fn cmd_run(
    config_path: Option<&Path>,
    dry_run: bool,
    no_lint: bool,
    tag: Option<String>,
) -> Result<()> {
    let credentials = Credentials::from_env();
    let config = super::load_config(config_path, &credentials)?.with_tag(tag);

    // Check every token up front so a missing one fails before any request
    let readwise_token = credentials.readwise_token()?;
    let buttondown_token = if dry_run {
        None
    } else {
        Some(credentials.buttondown_token()?)
    };
    let provider = create_provider(&config, &credentials)?;

    let source = ReadwiseSource::new(
        config.readwise.clone(),
        readwise_token,
        http::agent(config.http.timeout_secs),
    );
    let publisher = buttondown_token.map(|token| {
        ButtondownPublisher::new(
            config.buttondown.clone(),
            token,
            http::agent(config.http.timeout_secs),
        )
    });

    if no_lint {
        ui::warn("Lint gate disabled (--no-lint)");
    }

    let report = super::generate::summarize_with(provider.as_ref(), &config, |summarizer| {
        let mut pipeline = Pipeline::new(&source, summarizer, config.digest.clone());
        pipeline.publisher = publisher.as_ref().map(|p| p as &dyn Publisher);
        pipeline.lint = (!no_lint).then(|| config.lint.clone());
        pipeline.lookback_hours = config.readwise.lookback_hours;
        pipeline.articles_path = Some(config.output_dir().join(ARTICLES_FILE));
        pipeline.observer = &ConsoleObserver;
        pipeline.run(Utc::now())
    })?;

    match &report.receipt {
        Some(receipt) => ui::success(&format!(
            "Buttondown {} created: {}",
            receipt.status,
            colors::identifier(receipt.id.as_deref().unwrap_or("(no id)"))
        )),
        None => ui::success(&format!(
            "Dry run complete: {}",
            colors::identifier(&report.digest_path.display().to_string())
        )),
    }
    Ok(())
}
