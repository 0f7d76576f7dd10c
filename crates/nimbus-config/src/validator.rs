//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn collected errors into a single [`ConfigError::Validation`].
    ///
    /// Returns the warnings when there are no errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Validation(message))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_github(config, &mut result);
        Self::validate_webhook(config, &mut result);
        Self::validate_server(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_github(config: &Config, result: &mut ValidationResult) {
        let github = &config.github;

        if github.password.is_empty() {
            result.add_error(ValidationError::new(
                "github.password",
                "A token or password is required (GIT_PASSWORD)",
            ));
        }

        if github.username.is_some() {
            result.add_warning(ValidationWarning::new(
                "github.username",
                "Basic authentication is deprecated by GitHub, prefer a token",
            ));
        }

        if github.organization.is_empty() {
            result.add_error(ValidationError::new(
                "github.organization",
                "Organization is required (ORGANIZATION)",
            ));
        }

        let repo = github.repository_full_name();
        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            result.add_error(ValidationError::new(
                "github.repository",
                format!("Repository must be a name or owner/name, got '{}'", github.repository),
            ));
        }

        if !Self::is_http_url(&github.api_url) {
            result.add_error(ValidationError::new(
                "github.api_url",
                "api_url must be an http:// or https:// URL",
            ));
        }
    }

    fn validate_webhook(config: &Config, result: &mut ValidationResult) {
        let webhook = &config.webhook;

        if webhook.callback_path.trim_matches('/').is_empty() {
            result.add_error(ValidationError::new(
                "webhook.callback_path",
                "Callback path is required (CALLBACK_PATH)",
            ));
        } else if webhook.callback_path.trim_matches('/') == "health" {
            result.add_error(ValidationError::new(
                "webhook.callback_path",
                "Callback path conflicts with the /health route",
            ));
        } else if !Self::is_literal_route(&webhook.callback_path) {
            result.add_error(ValidationError::new(
                "webhook.callback_path",
                "Callback path must not contain route parameters (':', '*', '{' or '}')",
            ));
        }

        if webhook.external_host.is_empty() {
            result.add_error(ValidationError::new(
                "webhook.external_host",
                "External host is required (EXTERNAL_HOST)",
            ));
        } else if !Self::is_http_url(&webhook.external_host) {
            result.add_error(ValidationError::new(
                "webhook.external_host",
                "external_host must start with http:// or https://",
            ));
        } else if webhook.external_host.starts_with("http://") {
            result.add_warning(ValidationWarning::new(
                "webhook.external_host",
                "Webhook deliveries will be sent over plain HTTP",
            ));
        }
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.filter_directive().is_none() {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level '{}'", config.logging.level),
            ));
        }
    }

    /// A path the router takes as a literal: no `{}` captures and no segment
    /// starting with `:` or `*`.
    fn is_literal_route(path: &str) -> bool {
        !path.contains(['{', '}'])
            && path
                .split('/')
                .all(|segment| !segment.starts_with([':', '*']))
    }

    fn is_http_url(value: &str) -> bool {
        Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
