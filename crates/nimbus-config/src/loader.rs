//! Configuration loader.
//!
//! A config file is optional. Whatever it sets can be overridden by the
//! environment, which is how the bot is usually deployed.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variables read by [`ConfigLoader::apply_env`].
pub const ENV_VARS: &[&str] = &[
    "GIT_USERNAME",
    "GIT_PASSWORD",
    "GITHUB_API_URL",
    "ORGANIZATION",
    "NIMBUS_REPOSITORY",
    "NIMBUS_ADMIN_TEAM",
    "CALLBACK_PATH",
    "EXTERNAL_HOST",
    "NIMBUS_HOST",
    "NIMBUS_PORT",
    "NIMBUS_HUB_URL",
    "LOGGING_LEVEL",
    "NIMBUS_LOG_DIR",
];

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load the optional file, then overlay the process environment.
    pub fn load_layered(path: Option<&Path>) -> Result<Config, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Config::default(),
        };
        Self::apply_env(config, |key| std::env::var(key).ok())
    }

    /// Overlay values found through `lookup` onto `config`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("GIT_USERNAME") {
            config.github.username = Some(v);
        }
        if let Some(v) = get("GIT_PASSWORD") {
            config.github.password = v;
        }
        if let Some(v) = get("GITHUB_API_URL") {
            config.github.api_url = v;
        }
        if let Some(v) = get("ORGANIZATION") {
            config.github.organization = v;
        }
        if let Some(v) = get("NIMBUS_REPOSITORY") {
            config.github.repository = v;
        }
        if let Some(v) = get("NIMBUS_ADMIN_TEAM") {
            config.github.admin_team = v;
        }
        if let Some(v) = get("CALLBACK_PATH") {
            config.webhook.callback_path = v;
        }
        if let Some(v) = get("EXTERNAL_HOST") {
            config.webhook.external_host = v;
        }
        if let Some(v) = get("NIMBUS_HOST") {
            config.server.host = v;
        }
        if let Some(v) = get("NIMBUS_PORT") {
            config.server.port = v.parse().map_err(|_| ConfigError::InvalidValue {
                field: "NIMBUS_PORT".to_string(),
                message: format!("'{}' is not a port number", v),
            })?;
        }
        if let Some(v) = get("NIMBUS_HUB_URL") {
            config.workflow.hub_url = v;
        }
        if let Some(v) = get("LOGGING_LEVEL") {
            config.logging.level = v;
        }
        if let Some(v) = get("NIMBUS_LOG_DIR") {
            config.logging.directory = Some(PathBuf::from(Self::expand_path(&v)));
        }

        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/logs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
