//! Assets derived from a finished digest: social snippets and a podcast script.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::provider::{CompletionRequest, ModelProvider};
use crate::validation::extract_json;

/// Structured social copy for one digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSnippets {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub mastodon: String,
}

/// Parsed snippets, or the raw reply when it carried no usable JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SnippetOutput {
    Structured(SocialSnippets),
    Raw { raw: String },
}

impl SnippetOutput {
    /// Interpret a model reply.
    pub fn from_reply(reply: &str) -> Self {
        let structured = extract_json(reply)
            .filter(|value| {
                value.is_object()
                    && ["insights", "linkedin", "mastodon"]
                        .iter()
                        .any(|key| value.get(key).is_some())
            })
            .and_then(|value| serde_json::from_value::<SocialSnippets>(value).ok());

        match structured {
            Some(snippets) => SnippetOutput::Structured(snippets),
            None => {
                tracing::warn!("model reply had no snippet JSON; keeping raw text");
                SnippetOutput::Raw {
                    raw: reply.to_string(),
                }
            }
        }
    }
}

/// Model settings shared by the derived-asset generators.
pub struct Deriver<'a> {
    pub provider: &'a dyn ModelProvider,
    pub model: String,
    pub temperature: f32,
}

impl<'a> Deriver<'a> {
    pub fn new(provider: &'a dyn ModelProvider, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    fn ask(&self, system: &str, digest: &str) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: Some(system.to_string()),
            user: digest.to_string(),
            temperature: self.temperature,
        };
        self.provider.invoke(&request, &mut |_: &str| Ok(()))
    }

    /// Ask for social snippets and write `<out_dir>/<stem>.json`.
    pub fn create_snippets(&self, md_path: &Path, prompt: &str, out_dir: &Path) -> Result<PathBuf> {
        let digest = read_digest(md_path)?;
        let reply = self.ask(prompt, &digest)?;
        let snippets = SnippetOutput::from_reply(&reply);

        let out_file = output_path(md_path, out_dir, ".json")?;
        let json = serde_json::to_string_pretty(&snippets)?;
        write_output(&out_file, &json)?;
        Ok(out_file)
    }

    /// Ask for a podcast script and write `<out_dir>/<stem>_script.txt`.
    pub fn podcast_script(&self, md_path: &Path, prompt: &str, out_dir: &Path) -> Result<PathBuf> {
        let digest = read_digest(md_path)?;
        let script = self.ask(prompt, &digest)?;

        let out_file = output_path(md_path, out_dir, "_script.txt")?;
        write_output(&out_file, script.trim())?;
        Ok(out_file)
    }
}

fn read_digest(md_path: &Path) -> Result<String> {
    fs::read_to_string(md_path)
        .with_context(|| format!("Failed to read digest from {}", md_path.display()))
}

fn output_path(md_path: &Path, out_dir: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = md_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Cannot derive a file name from {}", md_path.display()))?;
    Ok(out_dir.join(format!("{}{}", stem, suffix)))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
