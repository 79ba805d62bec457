//! Configuration management for ohmbudsman projects.
//!
//! Configuration lives in the YAML front matter of a Markdown file so the
//! body can carry notes for whoever runs the pipeline. Secrets never live
//! here; see [`Credentials`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::digest::split_front_matter;
use crate::lint::LintRules;
use crate::paths::CONFIG_FILE;
use crate::provider::ProviderConfig;

pub mod credentials;
pub mod defaults;
pub mod validation;

pub use credentials::*;
pub use defaults::*;
pub use validation::*;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub readwise: ReadwiseConfig,
    #[serde(default)]
    pub provider: ModelConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub buttondown: ButtondownConfig,
    #[serde(default)]
    pub lint: LintRules,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/ohmbudsman/config.md)
    /// 2. Project config (.ohmbudsman/config.md), skipped when absent
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(CONFIG_FILE), false)
    }

    /// Load with an explicit project config path, which must exist.
    pub fn load_with(project_path: &Path) -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), project_path, true)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config = PartialConfig::default().merge_with(PartialConfig::parse(content)?);

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from specified global and project config paths.
    /// Project sections replace global sections wholesale.
    pub fn load_merged_from(
        global_path: Option<&Path>,
        project_path: &Path,
        project_required: bool,
    ) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = if project_required || project_path.exists() {
            PartialConfig::load_from(project_path)?
        } else {
            PartialConfig::default()
        };

        let config = global_config.merge_with(project_config);
        config.validate()?;
        Ok(config)
    }

    /// Replace the Reader tag filter (READWISE_TAG, --tag).
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        if let Some(tag) = tag {
            self.readwise.tag = tag;
        }
        self
    }

    /// Directory where the digest and fetched articles are written.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.digest.output_dir)
    }
}

/// Returns the path to the global config file at ~/.config/ohmbudsman/config.md
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/ohmbudsman/config.md"))
}

/// Partial config for merging - all sections optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub digest: Option<DigestConfig>,
    pub readwise: Option<ReadwiseConfig>,
    pub provider: Option<ModelConfig>,
    pub providers: Option<ProviderConfig>,
    pub buttondown: Option<ButtondownConfig>,
    pub lint: Option<LintRules>,
    pub render: Option<RenderConfig>,
    pub audio: Option<AudioConfig>,
    pub http: Option<HttpConfig>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_front_matter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        // An empty front matter block deserializes as YAML null.
        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        Config {
            digest: project.digest.or(self.digest).unwrap_or_default(),
            readwise: project.readwise.or(self.readwise).unwrap_or_default(),
            provider: project.provider.or(self.provider).unwrap_or_default(),
            providers: project.providers.or(self.providers).unwrap_or_default(),
            buttondown: project.buttondown.or(self.buttondown).unwrap_or_default(),
            lint: project.lint.or(self.lint).unwrap_or_default(),
            render: project.render.or(self.render).unwrap_or_default(),
            audio: project.audio.or(self.audio).unwrap_or_default(),
            http: project.http.or(self.http).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests;
