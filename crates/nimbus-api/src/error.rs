//! Interface error types.

use thiserror::Error;

use nimbus_protocols::PayloadError;
use nimbus_workflow::WorkflowError;

#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Delivery body did not match the event's payload shape.
    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    /// A workflow rule failed while handling a delivery.
    #[error("Workflow failed: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
