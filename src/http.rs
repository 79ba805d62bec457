//! Shared blocking HTTP helpers for the stage clients.

use anyhow::anyhow;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

/// Build an agent with connect/read timeouts applied to every request.
pub fn agent(timeout_secs: u64) -> Agent {
    AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Turn a ureq error into an error naming the service, status and body.
pub fn describe_error(service: &str, err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let body = body.trim();
            if body.is_empty() {
                anyhow!("{} API error: HTTP {}", service, code)
            } else {
                anyhow!("{} API error: HTTP {}: {}", service, code, body)
            }
        }
        ureq::Error::Transport(transport) => anyhow!("{} request failed: {}", service, transport),
    }
}

/// Join a base URL and a path segment with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
