//! Validation logic for loaded configuration.

use anyhow::{Context, Result};

use super::defaults::{AudioConfig, HttpConfig, ModelConfig, ReadwiseConfig};
use super::Config;
use crate::lint::LintRules;

/// Check that `value` is an absolute http(s) URL.
pub fn validate_endpoint(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .with_context(|| format!("{} is not a valid URL: {}", field, value))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("{} must use http or https, got {}: {}", field, other, value),
    }
}

impl ReadwiseConfig {
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("readwise.endpoint", &self.endpoint)?;
        if self.lookback_hours == 0 {
            anyhow::bail!("readwise.lookback_hours must be greater than 0");
        }
        if self.page_size == 0 {
            anyhow::bail!("readwise.page_size must be greater than 0");
        }
        Ok(())
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            anyhow::bail!("provider.model must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            );
        }
        if self.max_chunk_tokens == 0 {
            anyhow::bail!("provider.max_chunk_tokens must be greater than 0");
        }
        Ok(())
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("audio.endpoint", &self.endpoint)?;
        if self.voice_id.trim().is_empty() {
            anyhow::bail!("audio.voice_id must not be empty");
        }
        for (field, value) in [
            ("audio.stability", self.stability),
            ("audio.similarity_boost", self.similarity_boost),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{} must be between 0.0 and 1.0, got {}", field, value);
            }
        }
        Ok(())
    }
}

fn validate_lint(rules: &LintRules) -> Result<()> {
    if rules.headings == 0 {
        anyhow::bail!("lint.headings must be greater than 0");
    }
    if rules.max_bullet_words == 0 || rules.max_sentence_words == 0 {
        anyhow::bail!("lint word limits must be greater than 0");
    }
    Ok(())
}

impl Config {
    /// Validate every section, reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.readwise.validate()?;
        self.provider.validate()?;
        self.http.validate()?;
        self.audio.validate()?;
        validate_endpoint("buttondown.endpoint", &self.buttondown.endpoint)?;
        validate_endpoint("providers.openai.endpoint", &self.providers.openai_endpoint())?;
        validate_endpoint("providers.ollama.endpoint", &self.providers.ollama_endpoint())?;
        validate_lint(&self.lint)?;
        if self.buttondown.status.trim().is_empty() {
            anyhow::bail!("buttondown.status must not be empty");
        }
        Ok(())
    }
}
