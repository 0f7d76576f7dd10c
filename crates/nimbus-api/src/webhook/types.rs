//! Webhook delivery types.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nimbus_protocols::GitHubEvent;

/// Body returned for every delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: u16,
}

impl WebhookResponse {
    pub fn ok() -> Self {
        Self { status: 200 }
    }
}

/// Delivery metadata taken from the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// `X-Github-Delivery`, or a generated id when absent.
    pub id: String,
    /// `X-Github-Event`; `None` when the header is missing.
    pub event: Option<GitHubEvent>,
}

impl Delivery {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let id = header("x-github-delivery")
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let event = header("x-github-event").map(GitHubEvent::from_header);

        Self { id, event }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
