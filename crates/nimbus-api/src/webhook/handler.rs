//! Webhook handler implementation.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use nimbus_protocols::{
    GitHubEvent, IssueCommentPayload, IssuesPayload, OrganizationPayload, PayloadError, PingPayload,
};
use nimbus_workflow::{AccessWorkflow, Outcome};

use super::types::{Delivery, WebhookResponse};
use crate::error::InterfaceError;
use crate::state::AppState;

/// Handle a GitHub webhook delivery.
///
/// POST /{callback_path}
pub async fn handle_github_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.record_delivery();
    let delivery = Delivery::from_headers(&headers);

    match &delivery.event {
        Some(event) => {
            info!("GitHub webhook received: event={}, delivery={}", event, delivery.id);
            match dispatch(&state.workflow, event, &body).await {
                Ok(outcome) => info!("Delivery {}: {}", delivery.id, outcome),
                Err(e) => error!("Failed to handle {} delivery {}: {}", event, delivery.id, e),
            }
        }
        None => debug!("Delivery {} has no X-Github-Event header", delivery.id),
    }

    (StatusCode::OK, Json(WebhookResponse::ok()))
}

/// Route one event to the matching workflow rule.
pub async fn dispatch(
    workflow: &AccessWorkflow,
    event: &GitHubEvent,
    body: &[u8],
) -> Result<Outcome, InterfaceError> {
    let outcome = match event {
        GitHubEvent::IssueComment => {
            let payload: IssueCommentPayload = parse(body)?;
            workflow.check_denied_comment(&payload).await?
        }
        GitHubEvent::Issues => {
            let payload: IssuesPayload = parse(body)?;
            workflow.notify_team_labeled(&payload).await?
        }
        GitHubEvent::Organization => {
            let payload: OrganizationPayload = parse(body)?;
            match payload.action.as_str() {
                "member_invited" => workflow.notify_invite(&payload).await?,
                "member_added" => workflow.notify_added(&payload).await?,
                other => {
                    debug!("Ignoring organization action {}", other);
                    Outcome::ignored(format!("organization {}", other))
                }
            }
        }
        GitHubEvent::Ping => {
            let payload: PingPayload = parse(body)?;
            match payload.hook_id() {
                Some(id) => info!("Received ping for hook {}", id),
                None => info!("Received ping"),
            }
            Outcome::ignored("ping")
        }
        GitHubEvent::Other(name) => {
            debug!("Ignoring event {}", name);
            Outcome::ignored(format!("event {}", name))
        }
    };
    Ok(outcome)
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, PayloadError> {
    serde_json::from_slice(body).map_err(PayloadError::from)
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
