//! Organization context resolved once at startup.

use std::collections::HashSet;

use tracing::info;

use nimbus_protocols::{IssueTracker, Organization, RepoRef, Repository, TrackerError, User};

use crate::error::WorkflowError;
use crate::rules::AWAITING_REVIEW_LABEL;

/// Everything the rules compare webhook payloads against.
#[derive(Debug, Clone)]
pub struct OrgContext {
    pub organization: Organization,
    pub repository: Repository,
    pub repo: RepoRef,
    /// Ids of organization members with the `admin` role.
    pub admin_ids: HashSet<u64>,
    /// The account the bot posts as.
    pub bot: User,
}

impl OrgContext {
    /// Look up the organization, its admins, the tracked repository and the
    /// bot account.
    ///
    /// Fails if the repository has no `awaiting-review` label.
    pub async fn resolve(
        tracker: &dyn IssueTracker,
        org: &str,
        repo: RepoRef,
    ) -> Result<Self, WorkflowError> {
        let bot = tracker.authenticated_user().await?;
        info!("Authenticated to GitHub as {}", bot.login);

        let organization = tracker.organization(org).await?;
        info!("Retrieved organization {} (id {})", organization.login, organization.id);

        let admin_ids: HashSet<u64> = tracker
            .org_members(org, Some("admin"))
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        info!("Found {} organization admins", admin_ids.len());

        let repository = tracker.repository(&repo).await?;
        info!("Retrieved repository {} (id {})", repository.full_name, repository.id);

        match tracker.label(&repo, AWAITING_REVIEW_LABEL).await {
            Ok(_) => {}
            Err(TrackerError::NotFound(_)) => {
                return Err(WorkflowError::MissingLabel(AWAITING_REVIEW_LABEL.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            organization,
            repository,
            repo,
            admin_ids,
            bot,
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn is_bot(&self, login: &str) -> bool {
        self.bot.login == login
    }
}
