//! [`IssueTracker`] implementation for [`GitHubClient`].

use async_trait::async_trait;
use serde_json::json;

use nimbus_protocols::{
    Comment, CreateHook, Hook, Issue, IssueEdit, IssueFilter, IssueTracker, Label, Organization,
    RepoRef, Repository, TrackerError, User,
};

use crate::client::GitHubClient;

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn authenticated_user(&self) -> Result<User, TrackerError> {
        self.get(self.endpoint(&["user"])?, &[]).await
    }

    async fn organization(&self, org: &str) -> Result<Organization, TrackerError> {
        self.get(self.endpoint(&["orgs", org])?, &[]).await
    }

    async fn org_members(&self, org: &str, role: Option<&str>) -> Result<Vec<User>, TrackerError> {
        let query: Vec<(&str, String)> =
            role.map(|r| ("role", r.to_string())).into_iter().collect();
        self.get_all(self.endpoint(&["orgs", org, "members"])?, &query).await
    }

    async fn org_hooks(&self, org: &str) -> Result<Vec<Hook>, TrackerError> {
        self.get_all(self.endpoint(&["orgs", org, "hooks"])?, &[]).await
    }

    async fn create_org_hook(&self, org: &str, hook: &CreateHook) -> Result<Hook, TrackerError> {
        self.post(self.endpoint(&["orgs", org, "hooks"])?, hook).await
    }

    async fn repository(&self, repo: &RepoRef) -> Result<Repository, TrackerError> {
        self.get(self.repo_endpoint(repo, &[])?, &[]).await
    }

    async fn label(&self, repo: &RepoRef, name: &str) -> Result<Label, TrackerError> {
        self.get(self.repo_endpoint(repo, &["labels", name])?, &[]).await
    }

    async fn issue(&self, repo: &RepoRef, number: u64) -> Result<Issue, TrackerError> {
        let number = number.to_string();
        self.get(self.repo_endpoint(repo, &["issues", number.as_str()])?, &[]).await
    }

    async fn issues(
        &self,
        repo: &RepoRef,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, TrackerError> {
        self.get_all(self.repo_endpoint(repo, &["issues"])?, &filter.query_pairs()).await
    }

    async fn issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<Comment>, TrackerError> {
        let number = number.to_string();
        self.get_all(self.repo_endpoint(repo, &["issues", number.as_str(), "comments"])?, &[]).await
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError> {
        let number = number.to_string();
        let url = self.repo_endpoint(repo, &["issues", number.as_str(), "comments"])?;
        self.post(url, &json!({ "body": body })).await
    }

    async fn edit_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        edit: &IssueEdit,
    ) -> Result<Issue, TrackerError> {
        let number = number.to_string();
        self.patch(self.repo_endpoint(repo, &["issues", number.as_str()])?, edit).await
    }
}
