//! GitHub webhook receiver.

mod handler;
mod types;

pub use handler::{dispatch, handle_github_webhook};
pub use types::{Delivery, WebhookResponse};
