//! Stage orchestration: fetch, summarize, lint, write, publish.
//!
//! Stages run strictly in sequence and the first failure ends the run.
//! Nothing here retries; a lint violation goes back to the operator.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

use crate::config::DigestConfig;
use crate::digest::Digest;
use crate::lint::{lint_snap_with, LintRules};
use crate::publish::{PublishReceipt, Publisher};
use crate::source::{save_articles, Article, ArticleSource};
use crate::summarize::Summarizer;
use crate::ui::Stage;

/// Observer for stage progress (UI output lives in the binary).
pub trait StageObserver {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _stage: Stage, _detail: &str) {}
}

/// Observer that ignores everything
pub struct Silent;

impl StageObserver for Silent {}

/// What a successful run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub articles: Vec<Article>,
    pub digest: Digest,
    pub digest_path: PathBuf,
    /// `None` on dry runs
    pub receipt: Option<PublishReceipt>,
}

pub struct Pipeline<'a> {
    pub source: &'a dyn ArticleSource,
    pub summarizer: &'a dyn Summarizer,
    /// `None` skips publication (dry run)
    pub publisher: Option<&'a dyn Publisher>,
    /// `None` disables the lint gate
    pub lint: Option<LintRules>,
    pub digest: DigestConfig,
    pub lookback_hours: u32,
    pub output_dir: PathBuf,
    /// Where fetched articles are saved as soon as the fetch succeeds
    pub articles_path: Option<PathBuf>,
    pub observer: &'a dyn StageObserver,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn ArticleSource,
        summarizer: &'a dyn Summarizer,
        digest: DigestConfig,
    ) -> Self {
        let output_dir = PathBuf::from(&digest.output_dir);
        Self {
            source,
            summarizer,
            publisher: None,
            lint: Some(LintRules::default()),
            digest,
            lookback_hours: 24,
            output_dir,
            articles_path: None,
            observer: &Silent,
        }
    }

    /// Run every stage with `now` as the reference time.
    pub fn run(&self, now: DateTime<Utc>) -> Result<PipelineReport> {
        self.observer.stage_started(Stage::Fetch);
        let cutoff = now - Duration::hours(i64::from(self.lookback_hours));
        let articles = self.source.fetch(cutoff).context("Fetch failed")?;
        if articles.is_empty() {
            return Err(anyhow!(
                "No articles tagged {} in past {} h",
                self.source.describe(),
                self.lookback_hours
            ));
        }
        if let Some(path) = &self.articles_path {
            save_articles(path, &articles)?;
        }
        self.observer
            .stage_finished(Stage::Fetch, &format!("{} articles", articles.len()));

        self.observer.stage_started(Stage::Summarize);
        let body = self
            .summarizer
            .summarize(&articles)
            .context("Summarization failed")?;
        self.observer.stage_finished(Stage::Summarize, "digest generated");

        if let Some(rules) = &self.lint {
            self.observer.stage_started(Stage::Lint);
            lint_snap_with(&body, rules).context("Generated digest failed lint")?;
            self.observer.stage_finished(Stage::Lint, "structure ok");
        } else {
            tracing::warn!("lint gate disabled");
        }

        self.observer.stage_started(Stage::Write);
        let digest = Digest::new(&self.digest, now, body);
        let digest_path = digest.write_to(&self.output_dir)?;
        self.observer
            .stage_finished(Stage::Write, &digest_path.display().to_string());

        let receipt = match self.publisher {
            Some(publisher) => {
                self.observer.stage_started(Stage::Publish);
                let receipt = publisher
                    .publish(&digest.subject(), &digest.to_markdown())
                    .context("Publish failed")?;
                self.observer.stage_finished(
                    Stage::Publish,
                    receipt.id.as_deref().unwrap_or(&receipt.status),
                );
                Some(receipt)
            }
            None => {
                tracing::info!("dry run; skipping publish");
                None
            }
        };

        Ok(PipelineReport {
            articles,
            digest,
            digest_path,
            receipt,
        })
    }
}
