//! Remote issue tracker errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_error_not_found() {
        let err = TrackerError::NotFound("/repos/a/b".to_string());
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_tracker_error_api() {
        let err = TrackerError::Api {
            status: 422,
            message: "Hook already exists on this organization".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Hook already exists"));
    }

    #[test]
    fn test_tracker_error_network() {
        let err = TrackerError::Network("connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
    }

    #[test]
    fn test_tracker_error_debug() {
        let err = TrackerError::Authentication("Bad credentials".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Authentication"));
    }
}
