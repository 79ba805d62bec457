//! API tokens supplied through the environment.
//!
//! Credentials are read once at the CLI edge and handed to the stage
//! constructors. Library code never reads these variables itself.

use anyhow::Result;
use std::fmt;

pub const READWISE_TOKEN_ENV: &str = "READWISE_TOKEN";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BUTTONDOWN_TOKEN_ENV: &str = "BUTTONDOWN_TOKEN";
pub const READWISE_TAG_ENV: &str = "READWISE_TAG";
pub const ELEVENLABS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

#[derive(Clone, Default)]
pub struct Credentials {
    pub readwise_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub buttondown_token: Option<String>,
    /// Text-to-speech key; audio is skipped in `assets` when unset
    pub elevenlabs_api_key: Option<String>,
    /// Tag override, not a secret but historically supplied alongside the tokens
    pub readwise_tag: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            readwise_token: get(READWISE_TOKEN_ENV),
            openai_api_key: get(OPENAI_API_KEY_ENV),
            buttondown_token: get(BUTTONDOWN_TOKEN_ENV),
            elevenlabs_api_key: get(ELEVENLABS_API_KEY_ENV),
            readwise_tag: get(READWISE_TAG_ENV),
        }
    }

    pub fn readwise_token(&self) -> Result<&str> {
        required(&self.readwise_token, READWISE_TOKEN_ENV)
    }

    pub fn openai_api_key(&self) -> Result<&str> {
        required(&self.openai_api_key, OPENAI_API_KEY_ENV)
    }

    pub fn buttondown_token(&self) -> Result<&str> {
        required(&self.buttondown_token, BUTTONDOWN_TOKEN_ENV)
    }

    pub fn elevenlabs_api_key(&self) -> Result<&str> {
        required(&self.elevenlabs_api_key, ELEVENLABS_API_KEY_ENV)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", name))
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("readwise_token", &redact(&self.readwise_token))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("buttondown_token", &redact(&self.buttondown_token))
            .field("elevenlabs_api_key", &redact(&self.elevenlabs_api_key))
            .field("readwise_tag", &self.readwise_tag)
            .finish()
    }
}
