//! Issue tracker trait definition.

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::types::{
    Comment, CreateHook, Hook, Issue, IssueEdit, IssueFilter, Label, Organization, RepoRef,
    Repository, User,
};

/// The subset of the GitHub REST API the bot drives.
///
/// Listing methods return every page.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// The account the bot is authenticated as.
    async fn authenticated_user(&self) -> Result<User, TrackerError>;

    async fn organization(&self, org: &str) -> Result<Organization, TrackerError>;

    /// Organization members, optionally filtered by role (`admin`, `member`).
    async fn org_members(&self, org: &str, role: Option<&str>) -> Result<Vec<User>, TrackerError>;

    async fn org_hooks(&self, org: &str) -> Result<Vec<Hook>, TrackerError>;

    async fn create_org_hook(&self, org: &str, hook: &CreateHook) -> Result<Hook, TrackerError>;

    async fn repository(&self, repo: &RepoRef) -> Result<Repository, TrackerError>;

    async fn label(&self, repo: &RepoRef, name: &str) -> Result<Label, TrackerError>;

    async fn issue(&self, repo: &RepoRef, number: u64) -> Result<Issue, TrackerError>;

    async fn issues(
        &self,
        repo: &RepoRef,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, TrackerError>;

    async fn issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<Comment>, TrackerError>;

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError>;

    async fn edit_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        edit: &IssueEdit,
    ) -> Result<Issue, TrackerError>;
}
