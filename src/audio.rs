//! Podcast audio: send a script to ElevenLabs text-to-speech and keep the MP3.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use ureq::Agent;

use crate::config::AudioConfig;
use crate::http;

/// Upper bound on a single synthesized episode.
const MAX_AUDIO_BYTES: u64 = 64 * 1024 * 1024;

/// Trait for text-to-speech backends
pub trait Synthesizer {
    /// MP3 bytes for `text`.
    fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// ElevenLabs text-to-speech client
pub struct ElevenLabsSynthesizer {
    pub config: AudioConfig,
    pub api_key: String,
    pub agent: Agent,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: AudioConfig, api_key: impl Into<String>, agent: Agent) -> Self {
        Self {
            config,
            api_key: api_key.into(),
            agent,
        }
    }
}

impl Synthesizer for ElevenLabsSynthesizer {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let url = http::join_url(
            &self.config.endpoint,
            &format!("text-to-speech/{}", self.config.voice_id),
        );
        tracing::info!(url = %url, chars = text.chars().count(), "synthesizing audio");

        let payload = SpeechRequest {
            text,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };
        let payload = serde_json::to_value(&payload).context("Failed to encode speech request")?;
        let response = self
            .agent
            .post(&url)
            .set("xi-api-key", &self.api_key)
            .set("Accept", "audio/mpeg")
            .send_json(payload)
            .map_err(|e| http::describe_error("ElevenLabs", e))?;

        let mut audio = Vec::new();
        response
            .into_reader()
            .take(MAX_AUDIO_BYTES)
            .read_to_end(&mut audio)
            .context("Failed to read ElevenLabs audio")?;
        if audio.is_empty() {
            return Err(anyhow!("ElevenLabs returned no audio"));
        }
        Ok(audio)
    }
}

/// Files written for one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFiles {
    pub mp3: PathBuf,
    pub transcript: PathBuf,
}

/// Synthesize `script_path` into `<out_dir>/<stem>.mp3` next to a
/// `<stem>.txt` transcript.
pub fn synthesize_script(
    synthesizer: &dyn Synthesizer,
    script_path: &Path,
    out_dir: &Path,
) -> Result<AudioFiles> {
    let text = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read podcast script {}", script_path.display()))?;
    if text.trim().is_empty() {
        bail!("Podcast script {} is empty", script_path.display());
    }
    let stem = script_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "episode".to_string());

    let audio = synthesizer.synthesize(&text)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let mp3 = out_dir.join(format!("{}.mp3", stem));
    fs::write(&mp3, &audio).with_context(|| format!("Failed to write {}", mp3.display()))?;

    let transcript = out_dir.join(format!("{}.txt", stem));
    if transcript.as_path() != script_path {
        fs::write(&transcript, &text)
            .with_context(|| format!("Failed to write {}", transcript.display()))?;
    }
    tracing::info!(path = %mp3.display(), bytes = audio.len(), "audio written");
    Ok(AudioFiles { mp3, transcript })
}
