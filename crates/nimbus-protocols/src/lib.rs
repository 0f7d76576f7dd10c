//! # Nimbus Protocols
//!
//! Core definitions shared by every nimbus-bot crate.
//! Contains only types and interfaces - no implementations.
//!
//! ## Contents
//!
//! - [`types`] - GitHub entities as seen through the REST API
//! - [`webhook`] - Typed webhook payloads and the [`GitHubEvent`] kind
//! - [`IssueTracker`] - The remote API seam used by the workflow
//! - [`error`] - [`TrackerError`] and [`PayloadError`]

pub mod error;
pub mod tracker;
pub mod types;
pub mod webhook;

pub use error::{PayloadError, TrackerError};
pub use tracker::IssueTracker;
pub use types::*;
pub use webhook::{
    GitHubEvent, Invitation, IssueCommentPayload, IssuesPayload, Membership, OrganizationPayload,
    PingPayload,
};
