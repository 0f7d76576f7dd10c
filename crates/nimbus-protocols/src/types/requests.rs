//! Request shapes sent to the issue tracker.

use serde::{Deserialize, Serialize};

use super::github::{HookConfig, IssueState};

/// Filter for listing repository issues.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl IssueFilter {
    /// Open issues only.
    pub fn open() -> Self {
        Self {
            state: Some(IssueState::Open),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Query-string pairs as the GitHub list-issues endpoint expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state {
            pairs.push(("state", state.as_str().to_string()));
        }
        if !self.labels.is_empty() {
            pairs.push(("labels", self.labels.join(",")));
        }
        if let Some(creator) = &self.creator {
            pairs.push(("creator", creator.clone()));
        }
        pairs
    }
}

/// Partial update of an issue.
///
/// `labels`, when present, replaces the full label set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl IssueEdit {
    /// Close the issue and leave exactly one label on it.
    pub fn close_with_label(label: impl Into<String>) -> Self {
        Self {
            state: Some(IssueState::Closed),
            labels: Some(vec![label.into()]),
        }
    }
}

/// Body of the create-organization-webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHook {
    pub name: String,
    pub config: HookConfig,
    pub events: Vec<String>,
    pub active: bool,
}

impl CreateHook {
    /// A JSON web hook delivering the given events to `url`.
    pub fn web(url: impl Into<String>, events: &[&str]) -> Self {
        Self {
            name: "web".to_string(),
            config: HookConfig {
                url: Some(url.into()),
                content_type: Some("json".to_string()),
            },
            events: events.iter().map(|e| e.to_string()).collect(),
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_filter_query_pairs() {
        let filter = IssueFilter::open()
            .with_label("awaiting-review")
            .with_creator("octocat");
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("state", "open".to_string()),
                ("labels", "awaiting-review".to_string()),
                ("creator", "octocat".to_string()),
            ]
        );
    }

    #[test]
    fn test_issue_filter_empty() {
        assert!(IssueFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_issue_edit_close_with_label_serialize() {
        let edit = IssueEdit::close_with_label("request-denied");
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "closed", "labels": ["request-denied"]})
        );
    }

    #[test]
    fn test_issue_edit_skips_unset_fields() {
        let json = serde_json::to_string(&IssueEdit::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_create_hook_web() {
        let hook = CreateHook::web("https://bot.example.org/payload", &["issues", "organization"]);
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(json["name"], "web");
        assert_eq!(json["config"]["content_type"], "json");
        assert_eq!(json["events"], serde_json::json!(["issues", "organization"]));
        assert_eq!(json["active"], true);
    }
}
