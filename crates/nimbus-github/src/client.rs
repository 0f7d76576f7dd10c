//! HTTP plumbing: authentication, URL building, pagination, error mapping.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use nimbus_protocols::{RepoRef, TrackerError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("nimbus-bot/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const DEFAULT_PAGE_SIZE: usize = 100;

/// How the client authenticates.
#[derive(Clone)]
pub enum Credentials {
    /// Personal access token, sent as a bearer token.
    Token(String),
    /// Username and password, sent as HTTP basic auth.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Token auth when no username is given, basic auth otherwise.
    pub fn from_parts(username: Option<String>, password: String) -> Self {
        match username {
            Some(username) => Self::Basic { username, password },
            None => Self::Token(password),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Basic { username, .. } => write!(f, "Basic({}, <redacted>)", username),
        }
    }
}

/// GitHub REST API client.
pub struct GitHubClient {
    credentials: Credentials,
    api_url: Url,
    client: reqwest::Client,
    page_size: usize,
}

impl GitHubClient {
    pub fn new(credentials: Credentials) -> Result<Self, TrackerError> {
        Self::with_url(credentials, DEFAULT_API_URL)
    }

    /// Create a client against a custom API root (GitHub Enterprise, tests).
    pub fn with_url(credentials: Credentials, api_url: &str) -> Result<Self, TrackerError> {
        let api_url = Url::parse(api_url).map_err(|e| {
            TrackerError::InvalidRequest(format!("invalid API URL '{}': {}", api_url, e))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(TrackerError::InvalidRequest(format!(
                "API URL '{}' cannot be a base",
                api_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TrackerError::Network(e.to_string()))?;

        Ok(Self {
            credentials,
            api_url,
            client,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the `per_page` used for listing endpoints.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Build an endpoint URL from path segments; each segment is escaped.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, TrackerError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrackerError::InvalidRequest("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Endpoint under `/repos/{owner}/{name}`.
    pub(crate) fn repo_endpoint(&self, repo: &RepoRef, rest: &[&str]) -> Result<Url, TrackerError> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str()];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);

        match &self.credentials {
            Credentials::Token(token) => builder.bearer_auth(token),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, TrackerError> {
        let response = builder
            .send()
            .await
            .map_err(|e| TrackerError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let text = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), &url, &text))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TrackerError> {
        response
            .json()
            .await
            .map_err(|e| TrackerError::Decode(e.to_string()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, TrackerError> {
        debug!("GET {}", url);
        let response = self.send(self.request(reqwest::Method::GET, url).query(query)).await?;
        Self::decode(response).await
    }

    /// GET every page of a listing endpoint.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, TrackerError> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let mut pairs = query.to_vec();
            pairs.push(("per_page", self.page_size.to_string()));
            pairs.push(("page", page.to_string()));

            let batch: Vec<T> = self.get(url.clone(), &pairs).await?;
            let len = batch.len();
            items.extend(batch);

            if len < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, TrackerError> {
        debug!("POST {}", url);
        let response = self.send(self.request(reqwest::Method::POST, url).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, TrackerError> {
        debug!("PATCH {}", url);
        let response = self.send(self.request(reqwest::Method::PATCH, url).json(body)).await?;
        Self::decode(response).await
    }
}

/// Map a non-success response to a [`TrackerError`].
///
/// GitHub error bodies are `{"message": "..."}`; the raw body is used otherwise.
fn map_status(status: u16, path: &str, body: &str) -> TrackerError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    match status {
        404 => TrackerError::NotFound(path.to_string()),
        401 | 403 => TrackerError::Authentication(message),
        _ => TrackerError::Api { status, message },
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
