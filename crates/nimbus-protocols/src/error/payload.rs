//! Webhook payload errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Missing key in payload: {0}")]
    MissingKey(String),
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        // serde reports absent fields as "missing field `name` at line..".
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => Self::MissingKey(field.to_string()),
            None => Self::Malformed(message),
        }
    }
}
