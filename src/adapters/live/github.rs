//! Live adapter for the `RepoContent` and `IssueTracker` ports using the GitHub REST API.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{Config, RepoRef};
use crate::ports::{ContentEntry, FileContent, Issue, IssueTracker, PortError, PortFuture, RepoContent};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub REST client scoped to one repository.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    repo: RepoRef,
    token: Option<String>,
}

/// Request body for `POST /repos/{owner}/{repo}/issues`.
#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

/// Request body for `PATCH /repos/{owner}/{repo}/issues/{number}`.
#[derive(Serialize)]
struct UpdateIssueRequest<'a> {
    body: &'a str,
}

/// Error response from the GitHub API.
#[derive(Deserialize)]
struct GitHubError {
    message: String,
}

impl GitHubClient {
    /// Creates a client for `config.repo` against `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("mdlinkcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        })
    }

    /// Builds `{api_url}/repos/{owner}/{repo}/{segments...}` with each segment escaped.
    ///
    /// `.` and `..` segments are rejected: the URL builder would collapse them
    /// and the request would land on a different path than the one asked for.
    fn repo_url<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, PortError> {
        let segments: Vec<&str> = segments.into_iter().filter(|s| !s.is_empty()).collect();
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(format!("refusing path with '{dot}' segment: {}", segments.join("/")).into());
        }
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|()| format!("API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("accept", GITHUB_ACCEPT)
            .header("x-github-api-version", GITHUB_API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, PortError> {
        let response = request
            .send()
            .await
            .map_err(|e| -> PortError { format!("GitHub API request failed: {e}").into() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| -> PortError { format!("Failed to read GitHub API response: {e}").into() })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<GitHubError>(&text).map(|e| e.message).unwrap_or(text);
            return Err(format!("GitHub API error ({}): {msg}", status.as_u16()).into());
        }
        Ok(text)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PortError> {
        let text = self.send(request).await?;
        serde_json::from_str(&text).map_err(|e| -> PortError {
            format!("Failed to parse GitHub API response: {e}").into()
        })
    }
}

impl RepoContent for GitHubClient {
    fn list_dir<'a>(&'a self, path: &'a str) -> PortFuture<'a, Vec<ContentEntry>> {
        Box::pin(async move {
            let url = self.repo_url(std::iter::once("contents").chain(path.split('/')))?;
            let text = self.send(self.request(Method::GET, url)).await?;
            serde_json::from_str(&text).map_err(|e| -> PortError {
                format!("expected a directory listing at '{path}': {e}").into()
            })
        })
    }

    fn get_content<'a>(&'a self, path: &'a str) -> PortFuture<'a, FileContent> {
        Box::pin(async move {
            let url = self.repo_url(std::iter::once("contents").chain(path.split('/')))?;
            let value: serde_json::Value = self.send_json(self.request(Method::GET, url)).await?;
            // Directories come back as an array of entries; they exist but have no body.
            if value.is_array() {
                return Ok(FileContent { path: path.to_string(), content: None });
            }
            serde_json::from_value(value).map_err(|e| -> PortError {
                format!("Failed to parse content of '{path}': {e}").into()
            })
        })
    }
}

impl IssueTracker for GitHubClient {
    fn list_open<'a>(&'a self, label: &'a str, creator: &'a str) -> PortFuture<'a, Vec<Issue>> {
        Box::pin(async move {
            let url = self.repo_url(["issues"])?;
            let request = self
                .request(Method::GET, url)
                .query(&[("state", "open"), ("creator", creator), ("labels", label)]);
            self.send_json(request).await
        })
    }

    fn update_body<'a>(&'a self, number: u64, body: &'a str) -> PortFuture<'a, Issue> {
        Box::pin(async move {
            let number = number.to_string();
            let url = self.repo_url(["issues", number.as_str()])?;
            let request = self.request(Method::PATCH, url).json(&UpdateIssueRequest { body });
            self.send_json(request).await
        })
    }

    fn create<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        labels: &'a [String],
    ) -> PortFuture<'a, Issue> {
        Box::pin(async move {
            let url = self.repo_url(["issues"])?;
            let request =
                self.request(Method::POST, url).json(&CreateIssueRequest { title, body, labels });
            self.send_json(request).await
        })
    }
}
