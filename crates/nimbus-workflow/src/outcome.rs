//! What a workflow rule did.

use std::fmt;

use serde::Serialize;

/// Result of applying one rule to one event or issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The event is not about the tracked repository/organization, or not
    /// an event the rule acts on.
    Ignored { reason: String },
    NotDenied { issue: u64 },
    Denied { issue: u64 },
    AlreadyClosed { issue: u64 },
    Acknowledged { issue: u64 },
    AlreadyAcknowledged { issue: u64 },
    InviteNoticePosted { issue: u64 },
    Approved { issue: u64 },
    NoMatchingIssue { login: String },
}

impl Outcome {
    pub fn ignored(reason: impl Into<String>) -> Self {
        Self::Ignored {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored { reason } => write!(f, "ignored: {}", reason),
            Self::NotDenied { issue } => write!(f, "issue #{} not denied", issue),
            Self::Denied { issue } => write!(f, "issue #{} denied", issue),
            Self::AlreadyClosed { issue } => write!(f, "issue #{} already closed", issue),
            Self::Acknowledged { issue } => write!(f, "issue #{} acknowledged", issue),
            Self::AlreadyAcknowledged { issue } => {
                write!(f, "issue #{} already acknowledged", issue)
            }
            Self::InviteNoticePosted { issue } => write!(f, "invite notice on issue #{}", issue),
            Self::Approved { issue } => write!(f, "issue #{} approved", issue),
            Self::NoMatchingIssue { login } => write!(f, "no open request from {}", login),
        }
    }
}

/// Summary of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub scanned: usize,
    pub acknowledged: usize,
    pub denied: usize,
    pub failed: usize,
}
