//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderType;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_title, String, "Ohmbudsman Digest".to_string());
default_fn!(default_author, String, "Ohmbudsman".to_string());
default_fn!(default_license, String, "CC-BY-NC".to_string());
default_fn!(default_output_dir, String, "output".to_string());
default_fn!(
    default_readwise_endpoint,
    String,
    "https://readwise.io/api/v3/list/".to_string()
);
default_fn!(default_tag, String, "ohmbudsman".to_string());
default_fn!(default_category, String, "article".to_string());
default_fn!(default_lookback_hours, u32, 24);
default_fn!(default_page_size, u32, 1000);
default_fn!(default_model, String, "gpt-4o-mini".to_string());
default_fn!(default_temperature, f32, 0.3);
default_fn!(default_max_chunk_tokens, usize, 50_000);
default_fn!(default_prompt, String, "snap".to_string());
default_fn!(
    default_buttondown_endpoint,
    String,
    "https://api.buttondown.com/v1".to_string()
);
default_fn!(default_email_status, String, "draft".to_string());
default_fn!(default_pandoc, String, "pandoc".to_string());
default_fn!(default_pdf_engine, String, "xelatex".to_string());
default_fn!(default_render_version, String, "1.0".to_string());
default_fn!(default_render_output_dir, String, "outputs/pdfs".to_string());
default_fn!(default_timeout_secs, u64, 30);
default_fn!(
    default_audio_endpoint,
    String,
    "https://api.elevenlabs.io/v1".to_string()
);
default_fn!(default_voice_id, String, "21m00Tcm4TlvDq8ikWAM".to_string());
default_fn!(default_stability, f32, 0.5);
default_fn!(default_similarity_boost, f32, 0.75);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Front matter and output location of the assembled digest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DigestConfig {
    /// Title prefix of the subject line (default: "Ohmbudsman Digest")
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_license")]
    pub license: String,
    /// Directory for digest_output.md and articles.json (default: output)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: default_author(),
            license: default_license(),
            output_dir: default_output_dir(),
        }
    }
}

/// Readwise Reader list endpoint and filters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadwiseConfig {
    #[serde(default = "default_readwise_endpoint")]
    pub endpoint: String,
    /// Reader tag to filter on; empty disables the filter
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// How far back to look for updated documents (default: 24)
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ReadwiseConfig {
    fn default() -> Self {
        Self {
            endpoint: default_readwise_endpoint(),
            tag: default_tag(),
            category: default_category(),
            lookback_hours: default_lookback_hours(),
            page_size: default_page_size(),
        }
    }
}

/// Language model used for summarization and derived assets
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Provider (openai, ollama)
    #[serde(default)]
    pub kind: ProviderType,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Token budget per request; the article payload is chunked at 4 chars per token
    #[serde(default = "default_max_chunk_tokens")]
    pub max_chunk_tokens: usize,
    /// Prompt template name under .ohmbudsman/prompts (default: snap)
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ProviderType::default(),
            model: default_model(),
            temperature: default_temperature(),
            max_chunk_tokens: default_max_chunk_tokens(),
            prompt: default_prompt(),
        }
    }
}

/// Buttondown email API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ButtondownConfig {
    #[serde(default = "default_buttondown_endpoint")]
    pub endpoint: String,
    /// Email status sent with the draft (default: draft)
    #[serde(default = "default_email_status")]
    pub status: String,
}

impl Default for ButtondownConfig {
    fn default() -> Self {
        Self {
            endpoint: default_buttondown_endpoint(),
            status: default_email_status(),
        }
    }
}

/// Pandoc invocation for PDF output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default = "default_pandoc")]
    pub pandoc: String,
    #[serde(default = "default_pdf_engine")]
    pub pdf_engine: String,
    /// Version stamped into the PDF footer
    #[serde(default = "default_render_version")]
    pub version: String,
    #[serde(default = "default_render_output_dir")]
    pub output_dir: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pandoc: default_pandoc(),
            pdf_engine: default_pdf_engine(),
            version: default_render_version(),
            output_dir: default_render_output_dir(),
        }
    }
}

/// ElevenLabs text-to-speech for podcast audio
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    #[serde(default = "default_audio_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_stability")]
    pub stability: f32,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            endpoint: default_audio_endpoint(),
            voice_id: default_voice_id(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
