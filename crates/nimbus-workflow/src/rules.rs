//! Labels, the deny rule and comment templates.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Marks an issue pending administrator decision.
pub const AWAITING_REVIEW_LABEL: &str = "awaiting-review";

/// Left on an issue closed after an admin denied it.
pub const DENIED_LABEL: &str = "request-denied";

/// Left on an issue closed after the requester joined the organization.
pub const APPROVED_LABEL: &str = "request-approved";

static DENY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new("deny|denied|reject|rejected")
        .case_insensitive(true)
        .build()
        .expect("deny pattern is a valid regex")
});

/// Detects a denial in a comment body.
///
/// Case-insensitive substring search, so "Denying this" matches too.
#[derive(Debug, Clone)]
pub struct DenyRule {
    pattern: Regex,
}

impl DenyRule {
    pub fn new() -> Self {
        Self {
            pattern: DENY_PATTERN.clone(),
        }
    }

    pub fn matches(&self, body: &str) -> bool {
        self.pattern.is_match(body)
    }
}

impl Default for DenyRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Comment bodies posted by the bot.
#[derive(Debug, Clone)]
pub struct Messages {
    organization: String,
    admin_team: String,
    hub_url: String,
}

impl Messages {
    pub fn new(
        organization: impl Into<String>,
        admin_team: impl Into<String>,
        hub_url: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            admin_team: admin_team.into(),
            hub_url: hub_url.into(),
        }
    }

    /// Asks the admin team to review a request.
    pub fn acknowledgment(&self) -> String {
        format!(
            "\n@{}/{} Please review this application.\n",
            self.organization, self.admin_team
        )
    }

    /// Tells the requester an invitation is on its way.
    pub fn invite_notice(&self, login: &str) -> String {
        format!(
            "\n@{} You should receive an invite to {} shortly.\n",
            login, self.organization
        )
    }

    /// Welcomes a requester who joined the organization.
    pub fn welcome(&self, login: &str) -> String {
        format!(
            "\n@{login} You've been added to {org}.\n\n\
             Before you can continue please set your organization visibility to \
             [public](https://help.github.com/en/articles/publicizing-or-hiding-organization-membership)\n\n\
             Next visit {hub}.\n",
            login = login,
            org = self.organization,
            hub = self.hub_url,
        )
    }
}
