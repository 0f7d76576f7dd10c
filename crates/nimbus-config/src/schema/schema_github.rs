//! GitHub-facing configuration (credentials, organization, webhook).

use std::fmt;

use serde::{Deserialize, Serialize};

/// GitHub account and target organization.
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Login for basic auth. When absent `password` is used as a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Personal access token, or the password when `username` is set.
    #[serde(default, skip_serializing)]
    pub password: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub organization: String,

    /// Repository where access requests are filed: a name inside the
    /// organization or a full `owner/name`.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Team slug mentioned in the acknowledgment comment.
    #[serde(default = "default_admin_team")]
    pub admin_team: String,
}

impl GitHubConfig {
    /// `owner/name` of the tracked repository.
    pub fn repository_full_name(&self) -> String {
        if self.repository.contains('/') {
            self.repository.clone()
        } else {
            format!("{}/{}", self.organization, self.repository)
        }
    }

    pub fn uses_token(&self) -> bool {
        self.username.is_none()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: String::new(),
            api_url: default_api_url(),
            organization: String::new(),
            repository: default_repository(),
            admin_team: default_admin_team(),
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("organization", &self.organization)
            .field("repository", &self.repository)
            .field("admin_team", &self.admin_team)
            .finish()
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_repository() -> String {
    "getting_started".to_string()
}

fn default_admin_team() -> String {
    "admin".to_string()
}

/// Where GitHub delivers webhooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Path of the callback route, without the leading slash.
    #[serde(default)]
    pub callback_path: String,

    /// Public base URL of this service, e.g. `https://bot.example.org`.
    #[serde(default)]
    pub external_host: String,
}

impl WebhookConfig {
    /// Route the server mounts the callback on.
    pub fn route_path(&self) -> String {
        format!("/{}", self.callback_path.trim_matches('/'))
    }

    /// URL registered with GitHub.
    pub fn callback_url(&self) -> String {
        format!(
            "{}/{}",
            self.external_host.trim_end_matches('/'),
            self.callback_path.trim_matches('/')
        )
    }
}
