//! Runtime configuration (server, workflow text, logging).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Values interpolated into workflow comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Where newly added members go next.
    #[serde(default = "default_hub_url")]
    pub hub_url: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            hub_url: default_hub_url(),
        }
    }
}

fn default_hub_url() -> String {
    "https://aims2.llnl.gov/jupyterhub".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level name. Python-style names (`WARNING`, `CRITICAL`) are accepted.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Tracing filter directive for `level`, or `None` if the name is unknown.
    pub fn filter_directive(&self) -> Option<&'static str> {
        match self.level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Some("trace"),
            "DEBUG" => Some("debug"),
            "INFO" => Some("info"),
            "WARN" | "WARNING" => Some("warn"),
            "ERROR" | "CRITICAL" | "FATAL" => Some("error"),
            "OFF" => Some("off"),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

fn default_level() -> String {
    "INFO".to_string()
}
