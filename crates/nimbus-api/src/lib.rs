//! # Nimbus API
//!
//! HTTP surface of nimbus-bot.
//!
//! ```text
//! POST /{callback_path}  GitHub webhook deliveries
//! GET  /health           organization and repository the bot serves
//! ```
//!
//! Webhook deliveries are parsed from the raw body, dispatched on the
//! `X-Github-Event` header to [`AccessWorkflow`], and always answered with
//! `200 {"status": 200}`. Failures are logged, never returned to GitHub.
//!
//! [`AccessWorkflow`]: nimbus_workflow::AccessWorkflow

pub mod error;
pub mod http;
pub mod server;
pub mod state;
pub mod webhook;

pub use error::InterfaceError;
pub use http::routes::create_router;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;
pub use webhook::{Delivery, WebhookResponse, dispatch};
