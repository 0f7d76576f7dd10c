//! Workflow error types.

use thiserror::Error;

use nimbus_protocols::{PayloadError, TrackerError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("GitHub error: {0}")]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("Label '{0}' does not exist in the tracked repository")]
    MissingLabel(String),
}
