//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_github;
mod schema_runtime;

pub use schema_github::*;
pub use schema_runtime::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
