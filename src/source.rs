//! Article sources: where the digest's raw material comes from.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use ureq::Agent;

use crate::config::ReadwiseConfig;
use crate::http;

/// The fields of a Reader document the summarizer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
}

impl Article {
    /// Normalise a raw Reader document.
    pub fn from_reader_doc(doc: &serde_json::Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            title: text("title").unwrap_or_else(|| "Untitled".to_string()),
            link: text("url").or_else(|| text("source_url")).unwrap_or_default(),
            published: text("published_date").unwrap_or_default(),
            summary: text("summary").unwrap_or_default(),
        }
    }
}

/// Trait for article sources
pub trait ArticleSource {
    /// Articles updated after `updated_after`.
    fn fetch(&self, updated_after: DateTime<Utc>) -> Result<Vec<Article>>;

    /// Filter description for messages, e.g. `#ohmbudsman`.
    fn describe(&self) -> String;
}

/// Readwise Reader list API
pub struct ReadwiseSource {
    pub config: ReadwiseConfig,
    pub token: String,
    pub agent: Agent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    next_page_cursor: Option<String>,
}

impl ReadwiseSource {
    pub fn new(config: ReadwiseConfig, token: impl Into<String>, agent: Agent) -> Self {
        Self {
            config,
            token: token.into(),
            agent,
        }
    }
}

impl ArticleSource for ReadwiseSource {
    fn fetch(&self, updated_after: DateTime<Utc>) -> Result<Vec<Article>> {
        let updated_after = crate::iso_utc(updated_after);
        let page_size = self.config.page_size.to_string();
        tracing::info!(
            endpoint = %self.config.endpoint,
            updated_after = %updated_after,
            tag = %self.config.tag,
            "fetching Reader documents"
        );

        let mut request = self
            .agent
            .get(&self.config.endpoint)
            .set("Authorization", &format!("Token {}", self.token))
            .query("updatedAfter", &updated_after)
            .query("page_size", &page_size);
        if !self.config.category.is_empty() {
            request = request.query("category", &self.config.category);
        }
        if !self.config.tag.is_empty() {
            request = request.query("tags", &self.config.tag);
        }

        let response = request
            .call()
            .map_err(|e| http::describe_error("Readwise", e))?;
        let page: ListResponse = response
            .into_json()
            .context("Failed to parse Readwise response")?;

        if page.next_page_cursor.is_some() {
            tracing::warn!(
                count = page.results.len(),
                "Readwise returned more pages; only the first page is used"
            );
        }

        Ok(page.results.iter().map(Article::from_reader_doc).collect())
    }

    fn describe(&self) -> String {
        if self.config.tag.is_empty() {
            "(all tags)".to_string()
        } else {
            format!("#{}", self.config.tag)
        }
    }
}

/// Save articles as pretty-printed JSON, creating parent directories.
pub fn save_articles(path: &Path, articles: &[Article]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(articles)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write articles to {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Load articles written by [`save_articles`].
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read articles from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse articles in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_normalise_full_document() {
        let doc = json!({
            "title": "Grid storage doubles",
            "url": "https://read.readwise.io/read/abc",
            "source_url": "https://example.com/grid",
            "published_date": "2026-10-16",
            "summary": "Batteries everywhere.",
            "category": "article"
        });
        let article = Article::from_reader_doc(&doc);
        assert_eq!(article.title, "Grid storage doubles");
        assert_eq!(article.link, "https://read.readwise.io/read/abc");
        assert_eq!(article.published, "2026-10-16");
        assert_eq!(article.summary, "Batteries everywhere.");
    }

    #[test]
    fn test_normalise_defaults() {
        let doc = json!({ "source_url": "https://example.com", "title": null, "summary": null });
        let article = Article::from_reader_doc(&doc);
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.link, "https://example.com");
        assert_eq!(article.published, "");
        assert_eq!(article.summary, "");
    }

    #[test]
    fn test_normalise_empty_url_falls_back_to_source() {
        let doc = json!({ "url": "", "source_url": "https://example.com/s" });
        assert_eq!(Article::from_reader_doc(&doc).link, "https://example.com/s");
    }

    #[test]
    fn test_save_and_load_articles() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output/articles.json");
        let articles = vec![Article {
            title: "One".to_string(),
            link: "https://example.com/1".to_string(),
            published: String::new(),
            summary: "First".to_string(),
        }];
        save_articles(&path, &articles).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  {"), "expected pretty JSON: {}", content);
        assert_eq!(load_articles(&path).unwrap(), articles);
    }

    #[test]
    fn test_load_articles_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_articles(&tmp.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read articles"));
    }

    #[test]
    fn test_describe_tag() {
        let mut config = ReadwiseConfig::default();
        let source = ReadwiseSource::new(config.clone(), "t", http::agent(5));
        assert_eq!(source.describe(), "#ohmbudsman");
        config.tag.clear();
        let source = ReadwiseSource::new(config, "t", http::agent(5));
        assert_eq!(source.describe(), "(all tags)");
    }
}
