//! Publication stage: hand the finished digest to an email service.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::config::ButtondownConfig;
use crate::http;

/// What the email service told us about the created email.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublishReceipt {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Trait for publishers
pub trait Publisher {
    fn publish(&self, subject: &str, body: &str) -> Result<PublishReceipt>;
}

/// Buttondown email API client
pub struct ButtondownPublisher {
    pub config: ButtondownConfig,
    pub token: String,
    pub agent: Agent,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    subject: &'a str,
    body: &'a str,
    status: &'a str,
}

impl ButtondownPublisher {
    pub fn new(config: ButtondownConfig, token: impl Into<String>, agent: Agent) -> Self {
        Self {
            config,
            token: token.into(),
            agent,
        }
    }
}

impl Publisher for ButtondownPublisher {
    fn publish(&self, subject: &str, body: &str) -> Result<PublishReceipt> {
        let url = http::join_url(&self.config.endpoint, "emails");
        tracing::info!(url = %url, subject = %subject, status = %self.config.status, "creating email");

        let payload = EmailRequest {
            subject,
            body,
            status: &self.config.status,
        };
        let payload = serde_json::to_value(&payload).context("Failed to encode email request")?;
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Token {}", self.token))
            .send_json(payload)
            .map_err(|e| http::describe_error("Buttondown", e))?;

        let text = response
            .into_string()
            .context("Failed to read Buttondown response")?;
        Ok(parse_receipt(&text, &self.config.status))
    }
}

/// Parse Buttondown's reply, tolerating bodies that are not the expected JSON.
fn parse_receipt(text: &str, requested_status: &str) -> PublishReceipt {
    let mut receipt: PublishReceipt = serde_json::from_str(text).unwrap_or_default();
    if receipt.status.is_empty() {
        receipt.status = requested_status.to_string();
    }
    receipt
}
