//! Typed GitHub webhook payloads.
//!
//! Each payload struct mirrors the fields the bot reads from one event kind.
//! `action` stays a plain string so unknown actions deserialize and can be
//! ignored by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::types::{Comment, Hook, Issue, Label, Organization, Repository, User};

/// Event kind carried in the `X-Github-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEvent {
    IssueComment,
    Issues,
    Organization,
    Ping,
    Other(String),
}

impl GitHubEvent {
    /// Parse a header value. Matching is exact, as GitHub sends it.
    pub fn from_header(value: &str) -> Self {
        match value {
            "issue_comment" => Self::IssueComment,
            "issues" => Self::Issues,
            "organization" => Self::Organization,
            "ping" => Self::Ping,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::IssueComment => "issue_comment",
            Self::Issues => "issues",
            Self::Organization => "organization",
            Self::Ping => "ping",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for GitHubEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `issue_comment` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: Issue,
    pub comment: Comment,
    pub repository: Repository,
}

/// `issues` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesPayload {
    pub action: String,
    pub issue: Issue,
    /// Present on `labeled`/`unlabeled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    pub repository: Repository,
}

/// Organization membership attached to `member_added`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Invitation attached to `member_invited`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `organization` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationPayload {
    pub action: String,
    pub organization: Organization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<Membership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation: Option<Invitation>,
    /// The invited user on `member_invited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl OrganizationPayload {
    /// Login of the member the event is about.
    ///
    /// Looks at `membership.user`, then `user`, then `invitation.login`.
    pub fn member_login(&self) -> Result<&str, PayloadError> {
        if let Some(membership) = &self.membership {
            return Ok(&membership.user.login);
        }
        if let Some(user) = &self.user {
            return Ok(&user.login);
        }
        self.invitation
            .as_ref()
            .and_then(|i| i.login.as_deref())
            .ok_or_else(|| PayloadError::MissingKey("membership".to_string()))
    }
}

/// `ping` event sent when a hook is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<Hook>,
}

impl PingPayload {
    pub fn hook_id(&self) -> Option<u64> {
        self.hook.as_ref().map(|h| h.id).or(self.hook_id)
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
