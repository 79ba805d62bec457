//! Summarization stage: article records in, digest Markdown out.

use anyhow::{Context, Result};

use crate::prompt::{self, NOTES_PROMPT};
use crate::provider::{CompletionRequest, ModelProvider};
use crate::source::Article;

/// Rough characters-per-token ratio used to size request chunks.
pub const CHARS_PER_TOKEN: usize = 4;

/// Trait for summarizers
pub trait Summarizer {
    fn summarize(&self, articles: &[Article]) -> Result<String>;
}

/// Summarizer backed by a chat-completion model.
///
/// A payload that fits in one request is summarized in one call with the
/// digest prompt. Larger payloads are condensed chunk by chunk with the
/// notes prompt, and a final call turns the combined notes into a single
/// digest, so the result always has one set of section headings.
pub struct ModelSummarizer<'a> {
    pub provider: &'a dyn ModelProvider,
    pub model: String,
    pub temperature: f32,
    pub system_prompt: String,
    /// System prompt for the per-chunk pass of a multi-chunk payload
    pub notes_prompt: String,
    pub max_chunk_tokens: usize,
    /// Receives every streamed output line (progress display)
    pub on_line: Option<&'a dyn Fn(&str)>,
}

impl<'a> ModelSummarizer<'a> {
    pub fn new(
        provider: &'a dyn ModelProvider,
        model: impl Into<String>,
        temperature: f32,
        system_prompt: impl Into<String>,
        max_chunk_tokens: usize,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            system_prompt: system_prompt.into(),
            notes_prompt: prompt::builtin(NOTES_PROMPT)
                .unwrap_or_default()
                .to_string(),
            max_chunk_tokens,
            on_line: None,
        }
    }

    pub fn with_progress(mut self, on_line: &'a dyn Fn(&str)) -> Self {
        self.on_line = Some(on_line);
        self
    }

    pub fn with_notes_prompt(mut self, notes_prompt: impl Into<String>) -> Self {
        self.notes_prompt = notes_prompt.into();
        self
    }

    fn request(&self, system: &str, user: String) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            system: Some(system.to_string()),
            user,
            temperature: self.temperature,
        }
    }

    fn articles_request(&self, system: &str, chunk: &str) -> CompletionRequest {
        self.request(
            system,
            format!("Summarise the following JSON list of articles:\n{}", chunk),
        )
    }

    fn ask(&self, request: &CompletionRequest) -> Result<String> {
        let mut callback = |line: &str| -> Result<()> {
            if let Some(on_line) = self.on_line {
                on_line(line);
            }
            Ok(())
        };
        let output = self.provider.invoke(request, &mut callback)?;
        Ok(output.trim().to_string())
    }
}

impl Summarizer for ModelSummarizer<'_> {
    fn summarize(&self, articles: &[Article]) -> Result<String> {
        let payload =
            serde_json::to_string_pretty(articles).context("Failed to serialize articles")?;
        let chunks = chunk_text(&payload, self.max_chunk_tokens.saturating_mul(CHARS_PER_TOKEN));
        tracing::info!(
            articles = articles.len(),
            chunks = chunks.len(),
            provider = self.provider.name(),
            "summarizing"
        );

        if let [only] = chunks.as_slice() {
            return self
                .ask(&self.articles_request(&self.system_prompt, only))
                .context("Summarization failed on chunk 1/1");
        }

        let mut notes = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let part = self
                .ask(&self.articles_request(&self.notes_prompt, chunk))
                .with_context(|| format!("Summarization failed on chunk {}/{}", index + 1, chunks.len()))?;
            notes.push(part);
        }

        let combined = self.request(
            &self.system_prompt,
            format!(
                "Summarise the following notes on {} articles:\n{}",
                articles.len(),
                notes.join("\n\n")
            ),
        );
        self.ask(&combined)
            .with_context(|| format!("Summarization failed combining {} chunks", chunks.len()))
    }
}

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Counts characters, not bytes, so a code point is never cut in half.
/// An empty input yields a single empty chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records requests and answers with a fixed reply per call.
    struct ScriptedProvider {
        replies: RefCell<Vec<String>>,
        requests: RefCell<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().rev().map(|s| s.to_string()).collect()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModelProvider for ScriptedProvider {
        fn invoke(
            &self,
            request: &CompletionRequest,
            callback: &mut dyn FnMut(&str) -> Result<()>,
        ) -> Result<String> {
            self.requests.borrow_mut().push(request.clone());
            let reply = self
                .replies
                .borrow_mut()
                .pop()
                .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))?;
            for line in reply.lines() {
                callback(line)?;
            }
            Ok(reply)
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn article(n: usize) -> Article {
        Article {
            title: format!("Article {}", n),
            link: format!("https://example.com/{}", n),
            published: String::new(),
            summary: "x".repeat(50),
        }
    }

    #[test]
    fn test_chunk_text_exact_multiple() {
        assert_eq!(chunk_text("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn test_chunk_text_remainder() {
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_chunk_text_multibyte() {
        assert_eq!(chunk_text("📰📰📰", 2), vec!["📰📰", "📰"]);
    }

    #[test]
    fn test_chunk_text_empty() {
        assert_eq!(chunk_text("", 10), vec![""]);
    }

    #[test]
    fn test_single_chunk_summary() {
        let provider = ScriptedProvider::new(&["  # HEADLINE\n- 📰 Done.\n\n"]);
        let summarizer = ModelSummarizer::new(&provider, "gpt-4o-mini", 0.3, "system", 50_000);
        let digest = summarizer.summarize(&[article(1)]).unwrap();
        assert_eq!(digest, "# HEADLINE\n- 📰 Done.");

        let requests = provider.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some("system"));
        assert!(requests[0]
            .user
            .starts_with("Summarise the following JSON list of articles:\n["));
        assert!(requests[0].user.contains("Article 1"));
    }

    fn snap_digest() -> String {
        crate::digest::SNAP_LABELS
            .iter()
            .map(|label| format!("# {}\n- 📰 One fact for {}.", label, label.to_lowercase()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_multiple_chunks_become_one_digest() {
        let articles: Vec<Article> = (0..4).map(article).collect();
        let payload = serde_json::to_string_pretty(&articles).unwrap();
        // 40 tokens * 4 = 160 characters per chunk
        let chunk_count = chunk_text(&payload, 160).len();
        assert!(chunk_count > 1);

        let digest = snap_digest();
        let mut replies: Vec<String> = (1..=chunk_count).map(|i| format!("note {}", i)).collect();
        replies.push(digest.clone());
        let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
        let provider = ScriptedProvider::new(&replies);

        let summarizer = ModelSummarizer::new(&provider, "m", 0.3, "snap system", 40)
            .with_notes_prompt("notes system");
        let body = summarizer.summarize(&articles).unwrap();

        assert_eq!(body, digest);
        assert!(crate::lint::lint_snap(&body).is_ok());

        let requests = provider.requests.borrow();
        assert_eq!(requests.len(), chunk_count + 1);
        for request in &requests[..chunk_count] {
            assert_eq!(request.system.as_deref(), Some("notes system"));
        }
        let last = &requests[chunk_count];
        assert_eq!(last.system.as_deref(), Some("snap system"));
        assert!(last.user.starts_with("Summarise the following notes on 4 articles:\n"));
        assert!(last.user.contains("note 1\n\nnote 2"));
    }

    #[test]
    fn test_repeated_digest_replies_still_lint_clean() {
        // A model that answers every call with a full digest
        let articles: Vec<Article> = (0..3).map(article).collect();
        let digest = snap_digest();
        let replies = vec![digest.as_str(); 10];
        let provider = ScriptedProvider::new(&replies);

        let summarizer = ModelSummarizer::new(&provider, "m", 0.3, "s", 25);
        let body = summarizer.summarize(&articles).unwrap();

        assert!(provider.requests.borrow().len() > 2);
        assert_eq!(crate::lint::lint_snap(&body), Ok(()));
    }

    #[test]
    fn test_default_notes_prompt_is_builtin() {
        let provider = ScriptedProvider::new(&[]);
        let summarizer = ModelSummarizer::new(&provider, "m", 0.3, "s", 10);
        assert!(summarizer.notes_prompt.contains("no headings"));
    }

    #[test]
    fn test_combining_failure_is_reported() {
        let articles: Vec<Article> = (0..4).map(article).collect();
        let payload = serde_json::to_string_pretty(&articles).unwrap();
        let chunk_count = chunk_text(&payload, 160).len();
        let notes: Vec<String> = (0..chunk_count).map(|i| format!("note {}", i)).collect();
        let notes: Vec<&str> = notes.iter().map(String::as_str).collect();
        let provider = ScriptedProvider::new(&notes);

        let summarizer = ModelSummarizer::new(&provider, "m", 0.3, "s", 40);
        let err = summarizer.summarize(&articles).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Summarization failed combining {} chunks", chunk_count)
        );
    }

    #[test]
    fn test_progress_callback_sees_lines() {
        let provider = ScriptedProvider::new(&["one\ntwo"]);
        let seen = RefCell::new(Vec::new());
        let on_line = |line: &str| seen.borrow_mut().push(line.to_string());
        let summarizer =
            ModelSummarizer::new(&provider, "m", 0.3, "s", 50_000).with_progress(&on_line);
        summarizer.summarize(&[article(1)]).unwrap();
        assert_eq!(*seen.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn test_provider_error_names_chunk() {
        let provider = ScriptedProvider::new(&[]);
        let summarizer = ModelSummarizer::new(&provider, "m", 0.3, "s", 50_000);
        let err = summarizer.summarize(&[article(1)]).unwrap_err();
        assert!(err.to_string().contains("chunk 1/1"));
    }
}
