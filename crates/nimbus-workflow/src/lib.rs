//! # Nimbus Workflow
//!
//! The access-request approval workflow.
//!
//! An issue filed in the tracked repository and labeled `awaiting-review`
//! is a pending request. From there:
//!
//! - the admin team is asked to review it (once per issue)
//! - an admin comment saying deny/reject closes it as `request-denied`
//! - the organization inviting the requester posts a notice on it
//! - the requester joining the organization closes it as `request-approved`
//!
//! [`AccessWorkflow`] implements each rule against an [`IssueTracker`] and
//! reports what it did as an [`Outcome`]. [`AccessWorkflow::reconcile`] replays
//! the acknowledgment and deny rules over open requests at startup.
//!
//! [`IssueTracker`]: nimbus_protocols::IssueTracker

mod context;
mod error;
mod hooks;
mod mock_tracker;
mod outcome;
mod rules;
mod workflow;

pub use context::OrgContext;
pub use error::WorkflowError;
pub use hooks::{HookRegistration, WEBHOOK_EVENTS, register_webhook};
pub use mock_tracker::{MockTracker, fixtures};
pub use outcome::{Outcome, ReconcileReport};
pub use rules::{APPROVED_LABEL, AWAITING_REVIEW_LABEL, DENIED_LABEL, DenyRule, Messages};
pub use workflow::AccessWorkflow;
