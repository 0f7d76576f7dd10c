//! Organization webhook self-registration.

use tracing::{debug, info};

use nimbus_protocols::{CreateHook, IssueTracker};

use crate::error::WorkflowError;

/// Events the bot subscribes to.
pub const WEBHOOK_EVENTS: &[&str] = &["issues", "issue_comment", "organization"];

/// How registration went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookRegistration {
    Created { id: u64 },
    AlreadyRegistered { id: u64 },
}

/// Make sure the organization delivers [`WEBHOOK_EVENTS`] to `url`.
///
/// An existing hook with the same URL is left untouched.
pub async fn register_webhook(
    tracker: &dyn IssueTracker,
    org: &str,
    url: &str,
) -> Result<HookRegistration, WorkflowError> {
    let existing = tracker.org_hooks(org).await?;
    if let Some(hook) = existing
        .iter()
        .find(|h| h.config.url.as_deref() == Some(url))
    {
        debug!("Webhook {} already delivers to {}", hook.id, url);
        return Ok(HookRegistration::AlreadyRegistered { id: hook.id });
    }

    let request = CreateHook::web(url, WEBHOOK_EVENTS);
    info!("Attempting to register webhook on {} with payload {:?}", org, request);

    let hook = tracker.create_org_hook(org, &request).await?;
    info!("Successfully registered webhook {}", hook.id);
    Ok(HookRegistration::Created { id: hook.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_tracker::MockTracker;
    use nimbus_protocols::{Hook, HookConfig};

    #[tokio::test]
    async fn test_register_creates_hook() {
        let tracker = MockTracker::nimbus();
        let result = register_webhook(&tracker, "esgf-nimbus", "https://bot.example.org/payload")
            .await
            .unwrap();
        assert!(matches!(result, HookRegistration::Created { .. }));

        let hooks = tracker.hooks().await;
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].events, vec!["issues", "issue_comment", "organization"]);
        assert_eq!(hooks[0].config.content_type.as_deref(), Some("json"));
        assert!(hooks[0].active);
    }

    #[tokio::test]
    async fn test_register_skips_existing_url() {
        let tracker = MockTracker::nimbus();
        tracker
            .add_hook(Hook {
                id: 31,
                name: "web".to_string(),
                active: true,
                events: vec!["issues".to_string()],
                config: HookConfig {
                    url: Some("https://bot.example.org/payload".to_string()),
                    content_type: Some("json".to_string()),
                },
            })
            .await;

        let result = register_webhook(&tracker, "esgf-nimbus", "https://bot.example.org/payload")
            .await
            .unwrap();
        assert_eq!(result, HookRegistration::AlreadyRegistered { id: 31 });
        assert_eq!(tracker.hooks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_propagates_failure() {
        let tracker = MockTracker::nimbus();
        tracker.fail_on("create_org_hook").await;

        let result =
            register_webhook(&tracker, "esgf-nimbus", "https://bot.example.org/payload").await;
        assert!(matches!(result, Err(WorkflowError::Tracker(_))));
        assert!(tracker.hooks().await.is_empty());
    }
}
