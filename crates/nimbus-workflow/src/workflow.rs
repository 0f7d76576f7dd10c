//! The access-request rules.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use nimbus_protocols::{
    Issue, IssueCommentPayload, IssueEdit, IssueFilter, IssueState, IssueTracker, IssuesPayload,
    OrganizationPayload,
};

use crate::context::OrgContext;
use crate::error::WorkflowError;
use crate::outcome::{Outcome, ReconcileReport};
use crate::rules::{APPROVED_LABEL, AWAITING_REVIEW_LABEL, DENIED_LABEL, DenyRule, Messages};

/// Applies the approval rules to webhook events and open requests.
pub struct AccessWorkflow {
    tracker: Arc<dyn IssueTracker>,
    context: OrgContext,
    messages: Messages,
    deny: DenyRule,
}

impl AccessWorkflow {
    pub fn new(tracker: Arc<dyn IssueTracker>, context: OrgContext, messages: Messages) -> Self {
        Self {
            tracker,
            context,
            messages,
            deny: DenyRule::new(),
        }
    }

    pub fn context(&self) -> &OrgContext {
        &self.context
    }

    /// `issue_comment` / `created`: close the issue when an admin denies it.
    pub async fn check_denied_comment(
        &self,
        payload: &IssueCommentPayload,
    ) -> Result<Outcome, WorkflowError> {
        if payload.action != "created" {
            return Ok(Outcome::ignored(format!("comment {}", payload.action)));
        }
        let number = payload.issue.number;
        if payload.repository.id != self.context.repository.id || payload.issue.is_pull_request() {
            return Ok(Outcome::NotDenied { issue: number });
        }

        let author = &payload.comment.user;
        if self.context.is_bot(&author.login) || !self.context.is_admin(author.id) {
            debug!("Comment on #{} by {} is not from an admin", number, author.login);
            return Ok(Outcome::NotDenied { issue: number });
        }
        if !self.deny.matches(&payload.comment.body) {
            return Ok(Outcome::NotDenied { issue: number });
        }

        info!("Admin {} denied request #{}", author.login, number);
        let issue = self.tracker.issue(&self.context.repo, number).await?;
        self.deny_issue(&issue).await
    }

    /// Scan an issue's comments for an admin denial.
    pub async fn check_denied_issue(&self, issue: &Issue) -> Result<Outcome, WorkflowError> {
        let comments = self
            .tracker
            .issue_comments(&self.context.repo, issue.number)
            .await?;

        let denial = comments.iter().find(|c| {
            !self.context.is_bot(&c.user.login)
                && self.context.is_admin(c.user.id)
                && self.deny.matches(&c.body)
        });
        match denial {
            Some(comment) => {
                info!(
                    "Found denial by {} on request #{}",
                    comment.user.login, issue.number
                );
                self.deny_issue(issue).await
            }
            None => Ok(Outcome::NotDenied {
                issue: issue.number,
            }),
        }
    }

    /// Ask the admin team to review the issue, once.
    pub async fn notify_team(&self, issue: &Issue) -> Result<Outcome, WorkflowError> {
        let body = self.messages.acknowledgment();
        let comments = self
            .tracker
            .issue_comments(&self.context.repo, issue.number)
            .await?;

        let acknowledged = comments
            .iter()
            .any(|c| self.context.is_bot(&c.user.login) && c.body == body);
        if acknowledged {
            debug!("Request #{} already acknowledged", issue.number);
            return Ok(Outcome::AlreadyAcknowledged {
                issue: issue.number,
            });
        }

        self.tracker
            .create_comment(&self.context.repo, issue.number, &body)
            .await?;
        info!("Acknowledged request #{}", issue.number);
        Ok(Outcome::Acknowledged {
            issue: issue.number,
        })
    }

    /// `issues` / `labeled`: acknowledge a request once it is marked for review.
    pub async fn notify_team_labeled(
        &self,
        payload: &IssuesPayload,
    ) -> Result<Outcome, WorkflowError> {
        if payload.action != "labeled" {
            return Ok(Outcome::ignored(format!("issue {}", payload.action)));
        }
        let label = payload.label.as_ref().map(|l| l.name.as_str());
        if label != Some(AWAITING_REVIEW_LABEL) {
            return Ok(Outcome::ignored(format!(
                "label {}",
                label.unwrap_or("<none>")
            )));
        }
        if payload.repository.id != self.context.repository.id {
            return Ok(Outcome::ignored(format!(
                "repository {}",
                payload.repository.full_name
            )));
        }

        let issue = self
            .tracker
            .issue(&self.context.repo, payload.issue.number)
            .await?;
        self.notify_team(&issue).await
    }

    /// `organization` / `member_invited`: tell the requester an invite is coming.
    pub async fn notify_invite(
        &self,
        payload: &OrganizationPayload,
    ) -> Result<Outcome, WorkflowError> {
        if payload.action != "member_invited" {
            return Ok(Outcome::ignored(format!("organization {}", payload.action)));
        }
        if payload.organization.id != self.context.organization.id {
            return Ok(Outcome::ignored(format!(
                "organization {}",
                payload.organization.login
            )));
        }

        let login = payload.member_login()?;
        let Some(issue) = self.find_open_request(login).await? else {
            info!("No open request from invited user {}", login);
            return Ok(Outcome::NoMatchingIssue {
                login: login.to_string(),
            });
        };

        let body = self.messages.invite_notice(login);
        self.tracker
            .create_comment(&self.context.repo, issue.number, &body)
            .await?;
        info!("Posted invite notice for {} on #{}", login, issue.number);
        Ok(Outcome::InviteNoticePosted {
            issue: issue.number,
        })
    }

    /// `organization` / `member_added`: welcome the requester and close the request.
    pub async fn notify_added(
        &self,
        payload: &OrganizationPayload,
    ) -> Result<Outcome, WorkflowError> {
        if payload.action != "member_added" {
            return Ok(Outcome::ignored(format!("organization {}", payload.action)));
        }
        if payload.organization.id != self.context.organization.id {
            return Ok(Outcome::ignored(format!(
                "organization {}",
                payload.organization.login
            )));
        }

        let login = payload.member_login()?;
        let Some(issue) = self.find_open_request(login).await? else {
            info!("No open request from new member {}", login);
            return Ok(Outcome::NoMatchingIssue {
                login: login.to_string(),
            });
        };

        let body = self.messages.welcome(login);
        self.tracker
            .create_comment(&self.context.repo, issue.number, &body)
            .await?;
        self.close_with(issue.number, APPROVED_LABEL).await?;
        info!("Approved request #{} for {}", issue.number, login);
        Ok(Outcome::Approved {
            issue: issue.number,
        })
    }

    /// Acknowledge and check for denials on every open request.
    ///
    /// A failure on one issue is logged and counted once, and the pass moves on.
    pub async fn reconcile(&self) -> Result<ReconcileReport, WorkflowError> {
        let filter = IssueFilter::open().with_label(AWAITING_REVIEW_LABEL);
        let issues = self.tracker.issues(&self.context.repo, &filter).await?;
        info!("Reconciling {} open requests", issues.len());

        let mut report = ReconcileReport::default();
        for issue in issues.iter().filter(|i| !i.is_pull_request()) {
            report.scanned += 1;
            let mut failed = false;

            match self.notify_team(issue).await {
                Ok(Outcome::Acknowledged { .. }) => report.acknowledged += 1,
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to acknowledge request #{}: {}", issue.number, e);
                    failed = true;
                }
            }

            // Runs even when the acknowledgment failed.
            match self.check_denied_issue(issue).await {
                Ok(Outcome::Denied { .. }) => report.denied += 1,
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to check request #{} for denial: {}", issue.number, e);
                    failed = true;
                }
            }

            if failed {
                report.failed += 1;
            }
        }

        info!(
            "Reconciled {} requests: {} acknowledged, {} denied, {} failed",
            report.scanned, report.acknowledged, report.denied, report.failed
        );
        Ok(report)
    }

    async fn find_open_request(&self, login: &str) -> Result<Option<Issue>, WorkflowError> {
        let filter = IssueFilter::open()
            .with_label(AWAITING_REVIEW_LABEL)
            .with_creator(login);
        let issues = self.tracker.issues(&self.context.repo, &filter).await?;
        Ok(issues.into_iter().find(|i| !i.is_pull_request()))
    }

    async fn deny_issue(&self, issue: &Issue) -> Result<Outcome, WorkflowError> {
        if issue.state == IssueState::Closed {
            warn!("Request #{} is already closed", issue.number);
            return Ok(Outcome::AlreadyClosed {
                issue: issue.number,
            });
        }
        self.close_with(issue.number, DENIED_LABEL).await?;
        Ok(Outcome::Denied {
            issue: issue.number,
        })
    }

    async fn close_with(&self, number: u64, label: &str) -> Result<(), WorkflowError> {
        let edit = IssueEdit::close_with_label(label);
        self.tracker
            .edit_issue(&self.context.repo, number, &edit)
            .await?;
        info!("Closed #{} as {}", number, label);
        Ok(())
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
