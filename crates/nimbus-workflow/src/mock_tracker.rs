//! In-memory issue tracker for testing.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use nimbus_protocols::{
    Comment, CreateHook, Hook, Issue, IssueEdit, IssueFilter, IssueTracker, Label, Organization,
    RepoRef, Repository, TrackerError, User,
};

/// Users, issues and the organization used across workflow and API tests.
pub mod fixtures {
    use nimbus_protocols::{
        Comment, Issue, IssueState, Label, Organization, RepoRef, Repository, User,
    };

    pub const ORG: &str = "esgf-nimbus";
    pub const REPO: &str = "getting_started";

    pub fn user(id: u64, login: &str) -> User {
        User {
            id,
            login: login.to_string(),
        }
    }

    pub fn bot() -> User {
        user(1, "nimbus-bot")
    }

    pub fn admin() -> User {
        user(10, "boss")
    }

    pub fn requester() -> User {
        user(20, "alice")
    }

    pub fn organization() -> Organization {
        Organization {
            id: 100,
            login: ORG.to_string(),
        }
    }

    pub fn repository() -> Repository {
        Repository {
            id: 200,
            name: REPO.to_string(),
            full_name: format!("{}/{}", ORG, REPO),
            owner: user(100, ORG),
        }
    }

    pub fn other_repository() -> Repository {
        Repository {
            id: 999,
            name: "elsewhere".to_string(),
            full_name: format!("{}/elsewhere", ORG),
            owner: user(100, ORG),
        }
    }

    pub fn repo_ref() -> RepoRef {
        RepoRef::new(ORG, REPO)
    }

    /// An open issue.
    pub fn issue(number: u64, author: &User, labels: &[&str]) -> Issue {
        Issue {
            id: 5000 + number,
            number,
            title: format!("Access request #{}", number),
            state: IssueState::Open,
            user: author.clone(),
            labels: labels
                .iter()
                .map(|l| Label {
                    name: l.to_string(),
                })
                .collect(),
            pull_request: None,
        }
    }

    /// An open access request from [`requester`].
    pub fn request(number: u64) -> Issue {
        issue(number, &requester(), &["awaiting-review"])
    }

    pub fn comment(id: u64, author: &User, body: &str) -> Comment {
        Comment {
            id,
            body: body.to_string(),
            user: author.clone(),
        }
    }
}

struct State {
    bot: User,
    organization: Organization,
    repository: Repository,
    repo: RepoRef,
    members: Vec<(User, String)>,
    labels: HashSet<String>,
    issues: BTreeMap<u64, Issue>,
    comments: HashMap<u64, Vec<Comment>>,
    hooks: Vec<Hook>,
    posted: Vec<(u64, String)>,
    edits: Vec<(u64, IssueEdit)>,
    failing: HashSet<String>,
    next_id: u64,
}

/// Issue tracker backed by in-memory state.
///
/// Writes are applied to the state and also recorded, so tests can assert
/// on both the resulting issue and the calls that produced it.
pub struct MockTracker {
    state: RwLock<State>,
}

impl MockTracker {
    pub fn new(bot: User, organization: Organization, repository: Repository) -> Self {
        let repo = RepoRef::new(&repository.owner.login, &repository.name);
        Self {
            state: RwLock::new(State {
                bot,
                organization,
                repository,
                repo,
                members: Vec::new(),
                labels: HashSet::new(),
                issues: BTreeMap::new(),
                comments: HashMap::new(),
                hooks: Vec::new(),
                posted: Vec::new(),
                edits: Vec::new(),
                failing: HashSet::new(),
                next_id: 90_000,
            }),
        }
    }

    /// The `esgf-nimbus/getting_started` setup from [`fixtures`]: one admin,
    /// the bot as a member, and the `awaiting-review` label.
    pub fn nimbus() -> Self {
        let mut tracker = Self::new(
            fixtures::bot(),
            fixtures::organization(),
            fixtures::repository(),
        );
        let state = tracker.state.get_mut();
        state.members.push((fixtures::admin(), "admin".to_string()));
        state.members.push((fixtures::bot(), "member".to_string()));
        state.labels.insert("awaiting-review".to_string());
        tracker
    }

    pub async fn add_member(&self, user: User, role: &str) {
        self.state
            .write()
            .await
            .members
            .push((user, role.to_string()));
    }

    pub async fn remove_label(&self, name: &str) {
        self.state.write().await.labels.remove(name);
    }

    pub async fn add_issue(&self, issue: Issue) {
        self.state.write().await.issues.insert(issue.number, issue);
    }

    pub async fn add_comment(&self, number: u64, comment: Comment) {
        self.state
            .write()
            .await
            .comments
            .entry(number)
            .or_default()
            .push(comment);
    }

    pub async fn add_hook(&self, hook: Hook) {
        self.state.write().await.hooks.push(hook);
    }

    /// Make every call to `op` (an [`IssueTracker`] method name) fail.
    pub async fn fail_on(&self, op: &str) {
        self.state.write().await.failing.insert(op.to_string());
    }

    pub async fn issue_snapshot(&self, number: u64) -> Option<Issue> {
        self.state.read().await.issues.get(&number).cloned()
    }

    pub async fn comments_on(&self, number: u64) -> Vec<Comment> {
        self.state
            .read()
            .await
            .comments
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    /// Comments created through [`IssueTracker::create_comment`].
    pub async fn posted_comments(&self) -> Vec<(u64, String)> {
        self.state.read().await.posted.clone()
    }

    pub async fn edits(&self) -> Vec<(u64, IssueEdit)> {
        self.state.read().await.edits.clone()
    }

    pub async fn hooks(&self) -> Vec<Hook> {
        self.state.read().await.hooks.clone()
    }
}

impl State {
    fn check(&self, op: &str) -> Result<(), TrackerError> {
        if self.failing.contains(op) {
            return Err(TrackerError::Api {
                status: 500,
                message: format!("{} failed", op),
            });
        }
        Ok(())
    }

    fn check_org(&self, org: &str) -> Result<(), TrackerError> {
        if self.organization.login != org {
            return Err(TrackerError::NotFound(format!("/orgs/{}", org)));
        }
        Ok(())
    }

    fn check_repo(&self, repo: &RepoRef) -> Result<(), TrackerError> {
        if &self.repo != repo {
            return Err(TrackerError::NotFound(format!("/repos/{}", repo)));
        }
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn authenticated_user(&self) -> Result<User, TrackerError> {
        let state = self.state.read().await;
        state.check("authenticated_user")?;
        Ok(state.bot.clone())
    }

    async fn organization(&self, org: &str) -> Result<Organization, TrackerError> {
        let state = self.state.read().await;
        state.check("organization")?;
        state.check_org(org)?;
        Ok(state.organization.clone())
    }

    async fn org_members(&self, org: &str, role: Option<&str>) -> Result<Vec<User>, TrackerError> {
        let state = self.state.read().await;
        state.check("org_members")?;
        state.check_org(org)?;
        Ok(state
            .members
            .iter()
            .filter(|(_, r)| role.is_none_or(|wanted| r.as_str() == wanted))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn org_hooks(&self, org: &str) -> Result<Vec<Hook>, TrackerError> {
        let state = self.state.read().await;
        state.check("org_hooks")?;
        state.check_org(org)?;
        Ok(state.hooks.clone())
    }

    async fn create_org_hook(&self, org: &str, hook: &CreateHook) -> Result<Hook, TrackerError> {
        let mut state = self.state.write().await;
        state.check("create_org_hook")?;
        state.check_org(org)?;
        let created = Hook {
            id: state.next_id(),
            name: hook.name.clone(),
            active: hook.active,
            events: hook.events.clone(),
            config: hook.config.clone(),
        };
        state.hooks.push(created.clone());
        Ok(created)
    }

    async fn repository(&self, repo: &RepoRef) -> Result<Repository, TrackerError> {
        let state = self.state.read().await;
        state.check("repository")?;
        state.check_repo(repo)?;
        Ok(state.repository.clone())
    }

    async fn label(&self, repo: &RepoRef, name: &str) -> Result<Label, TrackerError> {
        let state = self.state.read().await;
        state.check("label")?;
        state.check_repo(repo)?;
        if state.labels.contains(name) {
            Ok(Label {
                name: name.to_string(),
            })
        } else {
            Err(TrackerError::NotFound(format!("/repos/{}/labels/{}", repo, name)))
        }
    }

    async fn issue(&self, repo: &RepoRef, number: u64) -> Result<Issue, TrackerError> {
        let state = self.state.read().await;
        state.check("issue")?;
        state.check_repo(repo)?;
        state
            .issues
            .get(&number)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("/repos/{}/issues/{}", repo, number)))
    }

    async fn issues(
        &self,
        repo: &RepoRef,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, TrackerError> {
        let state = self.state.read().await;
        state.check("issues")?;
        state.check_repo(repo)?;
        Ok(state
            .issues
            .values()
            .filter(|i| filter.state.is_none_or(|s| i.state == s))
            .filter(|i| filter.labels.iter().all(|l| i.has_label(l)))
            .filter(|i| {
                filter
                    .creator
                    .as_deref()
                    .is_none_or(|c| i.user.login == c)
            })
            .cloned()
            .collect())
    }

    async fn issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<Comment>, TrackerError> {
        let state = self.state.read().await;
        state.check("issue_comments")?;
        state.check_repo(repo)?;
        Ok(state.comments.get(&number).cloned().unwrap_or_default())
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError> {
        let mut state = self.state.write().await;
        state.check("create_comment")?;
        state.check_repo(repo)?;
        if !state.issues.contains_key(&number) {
            return Err(TrackerError::NotFound(format!("/repos/{}/issues/{}", repo, number)));
        }
        let comment = Comment {
            id: state.next_id(),
            body: body.to_string(),
            user: state.bot.clone(),
        };
        state
            .comments
            .entry(number)
            .or_default()
            .push(comment.clone());
        state.posted.push((number, body.to_string()));
        Ok(comment)
    }

    async fn edit_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        edit: &IssueEdit,
    ) -> Result<Issue, TrackerError> {
        let mut state = self.state.write().await;
        state.check("edit_issue")?;
        state.check_repo(repo)?;
        let issue = state
            .issues
            .get_mut(&number)
            .ok_or_else(|| TrackerError::NotFound(format!("/repos/{}/issues/{}", repo, number)))?;
        if let Some(s) = edit.state {
            issue.state = s;
        }
        if let Some(labels) = &edit.labels {
            issue.labels = labels
                .iter()
                .map(|name| Label { name: name.clone() })
                .collect();
        }
        let updated = issue.clone();
        state.edits.push((number, edit.clone()));
        Ok(updated)
    }
}
