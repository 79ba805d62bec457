//! Model provider abstraction for invoking language models.
//!
//! Both supported providers speak the OpenAI chat-completions wire format;
//! they differ in endpoint and in whether an API key is sent.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use ureq::Agent;

use crate::config::{Config, Credentials};
use crate::http;

/// Model provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Openai,
    Ollama,
}

/// Provider endpoint configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub ollama: Option<OllamaConfig>,
    #[serde(default)]
    pub openai: Option<OpenaiConfig>,
}

impl ProviderConfig {
    pub fn openai_endpoint(&self) -> String {
        self.openai
            .as_ref()
            .map(|c| c.endpoint.clone())
            .unwrap_or_else(default_openai_endpoint)
    }

    pub fn ollama_endpoint(&self) -> String {
        self.ollama
            .as_ref()
            .map(|c| c.endpoint.clone())
            .unwrap_or_else(default_ollama_endpoint)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434/v1".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenaiConfig {
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

/// One chat completion: optional system instructions plus a user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn to_json(&self, stream: bool) -> serde_json::Value {
        let mut messages = Vec::new();
        if let Some(system) = &self.system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": self.user }));

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": stream,
        })
    }
}

/// Trait for model providers
pub trait ModelProvider {
    /// Run a completion, passing each complete output line to `callback`.
    /// Returns the full output.
    fn invoke(
        &self,
        request: &CompletionRequest,
        callback: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// OpenAI provider
pub struct OpenaiProvider {
    pub endpoint: String,
    pub api_key: String,
    pub agent: Agent,
}

impl ModelProvider for OpenaiProvider {
    fn invoke(
        &self,
        request: &CompletionRequest,
        callback: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<String> {
        stream_chat_completion(
            &self.agent,
            &self.endpoint,
            Some(&self.api_key),
            request,
            callback,
        )
        .map_err(|e| {
            if e.to_string().contains("HTTP 401") {
                anyhow!("Authentication failed. Check OPENAI_API_KEY env var")
            } else {
                e
            }
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Ollama provider (OpenAI-compatible API, no key)
pub struct OllamaProvider {
    pub endpoint: String,
    pub agent: Agent,
}

impl ModelProvider for OllamaProvider {
    fn invoke(
        &self,
        request: &CompletionRequest,
        callback: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<String> {
        stream_chat_completion(&self.agent, &self.endpoint, None, request, callback).map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("Connection") || err_str.contains("connect") {
                anyhow!(
                    "Failed to connect to Ollama at {}\n\nOllama does not appear to be running. To fix:\n\n  1. Start Ollama: ollama serve\n  2. Pull a model: ollama pull {}\n\nOr switch back with 'provider: {{ kind: openai }}' in .ohmbudsman/config.md",
                    self.endpoint,
                    request.model
                )
            } else {
                e
            }
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

/// Build the provider selected in configuration.
pub fn create_provider(config: &Config, credentials: &Credentials) -> Result<Box<dyn ModelProvider>> {
    let agent = http::agent(config.http.timeout_secs);
    match config.provider.kind {
        ProviderType::Openai => Ok(Box::new(OpenaiProvider {
            endpoint: config.providers.openai_endpoint(),
            api_key: credentials.openai_api_key()?.to_string(),
            agent,
        })),
        ProviderType::Ollama => Ok(Box::new(OllamaProvider {
            endpoint: config.providers.ollama_endpoint(),
            agent,
        })),
    }
}

/// POST a streaming chat completion and collect the output.
fn stream_chat_completion(
    agent: &Agent,
    endpoint: &str,
    api_key: Option<&str>,
    request: &CompletionRequest,
    callback: &mut dyn FnMut(&str) -> Result<()>,
) -> Result<String> {
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(anyhow!("Invalid endpoint URL: {}", endpoint));
    }

    let url = http::join_url(endpoint, "chat/completions");
    tracing::debug!(url = %url, model = %request.model, "starting chat completion");

    let mut call = agent.post(&url).set("Content-Type", "application/json");
    if let Some(key) = api_key {
        call = call.set("Authorization", &format!("Bearer {}", key));
    }
    let response = call
        .send_json(request.to_json(true))
        .map_err(|e| http::describe_error("Model", e))?;

    let reader = std::io::BufReader::new(response.into_reader());
    let mut collector = StreamCollector::default();

    for line in reader.lines().map_while(Result::ok) {
        match parse_stream_line(&line) {
            StreamEvent::Done => break,
            StreamEvent::Content(content) => collector.push(&content, callback)?,
            StreamEvent::Skip => {}
        }
    }

    let output = collector.finish(callback)?;
    if output.trim().is_empty() {
        return Err(anyhow!("Empty response from model API"));
    }

    Ok(output)
}

/// One parsed server-sent-events line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Content(String),
    Done,
    Skip,
}

/// Parse a `data: {...}` line from a streaming chat completion.
pub fn parse_stream_line(line: &str) -> StreamEvent {
    let Some(json_str) = line.strip_prefix("data: ") else {
        return StreamEvent::Skip;
    };
    if json_str.trim() == "[DONE]" {
        return StreamEvent::Done;
    }

    let Ok(json) = serde_json::from_str::<serde_json::Value>(json_str) else {
        return StreamEvent::Skip;
    };

    let content: String = json
        .get("choices")
        .and_then(|c| c.as_array())
        .map(|choices| {
            choices
                .iter()
                .filter_map(|choice| {
                    choice
                        .get("delta")
                        .and_then(|d| d.get("content"))
                        .and_then(|c| c.as_str())
                })
                .collect()
        })
        .unwrap_or_default();

    if content.is_empty() {
        StreamEvent::Skip
    } else {
        StreamEvent::Content(content)
    }
}

/// Buffers streamed tokens and emits complete lines.
#[derive(Debug, Default)]
pub struct StreamCollector {
    line_buffer: String,
    output: String,
}

impl StreamCollector {
    pub fn push(&mut self, chunk: &str, callback: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        self.line_buffer.push_str(chunk);
        while let Some(newline_pos) = self.line_buffer.find('\n') {
            let complete_line: String = self.line_buffer.drain(..=newline_pos).collect();
            let complete_line = complete_line.trim_end_matches(&['\n', '\r'][..]);
            callback(complete_line)?;
            self.output.push_str(complete_line);
            self.output.push('\n');
        }
        Ok(())
    }

    /// Flush any remaining buffered content and return the full output.
    pub fn finish(mut self, callback: &mut dyn FnMut(&str) -> Result<()>) -> Result<String> {
        if !self.line_buffer.is_empty() {
            callback(&self.line_buffer)?;
            self.output.push_str(&self.line_buffer);
            self.output.push('\n');
        }
        Ok(self.output)
    }
}
