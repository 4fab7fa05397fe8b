//! Run configuration assembled from the environment and CLI overrides.

use std::time::Duration;

use crate::error::{Error, Result};

/// Label attached to, and used to find, the tracking issue.
pub const TRACKING_LABEL: &str = "link-check";

/// Title given to a newly created tracking issue.
pub const TRACKING_TITLE: &str = "🔍 Markdown Link Check Report";

/// User agent sent with external link probes.
pub const PROBE_USER_AGENT: &str = "Link-Checker-Bot";

/// Upper bound on a single external probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Domain whose blob URLs may point back into the checked repository.
pub const HOSTING_DOMAIN: &str = "github.com";

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_IDENTITY: &str = "app";

/// Identity of the repository under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Creates a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }

    /// Returns `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Everything a run needs to know about where to read and publish.
#[derive(Debug, Clone)]
pub struct Config {
    /// The repository being checked.
    pub repo: RepoRef,
    /// API token; requests go out unauthenticated when absent.
    pub token: Option<String>,
    /// Base URL of the hosting platform's REST API.
    pub api_url: String,
    /// Login that authors the tracking issue.
    pub identity: String,
    /// Directory whose markdown files are checked (`""` is the root).
    pub root_path: String,
    /// Timeout applied to each external probe.
    pub probe_timeout: Duration,
}

/// Optional values supplied on the command line. `Some` wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Listing root.
    pub path: Option<String>,
    /// Issue author login.
    pub identity: Option<String>,
    /// REST API base URL.
    pub api_url: Option<String>,
}

impl Config {
    /// Builds the config from process environment variables, after loading `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the owner or repository cannot be determined.
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Recognized variables: `MDLINKCHECK_OWNER`, `MDLINKCHECK_REPO`,
    /// `GITHUB_REPOSITORY` (`owner/name`, used when either part is missing),
    /// `GITHUB_TOKEN`, `MDLINKCHECK_API_URL`, `MDLINKCHECK_IDENTITY`,
    /// `MDLINKCHECK_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the owner or repository cannot be determined.
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (fallback_owner, fallback_repo) = lookup("GITHUB_REPOSITORY")
            .and_then(|full| {
                full.split_once('/').map(|(o, r)| (Some(o.to_string()), Some(r.to_string())))
            })
            .unwrap_or((None, None));

        let owner = overrides
            .owner
            .or_else(|| lookup("MDLINKCHECK_OWNER"))
            .or(fallback_owner)
            .ok_or_else(|| Error::Config("missing repository owner".into()))?;
        let name = overrides
            .repo
            .or_else(|| lookup("MDLINKCHECK_REPO"))
            .or(fallback_repo)
            .ok_or_else(|| Error::Config("missing repository name".into()))?;

        let api_url = overrides
            .api_url
            .or_else(|| lookup("MDLINKCHECK_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if url::Url::parse(&api_url).is_err() {
            return Err(Error::Config(format!("invalid API URL: {api_url}")));
        }

        Ok(Self {
            repo: RepoRef::new(owner, name),
            token: lookup("GITHUB_TOKEN"),
            api_url: api_url.trim_end_matches('/').to_string(),
            identity: overrides
                .identity
                .or_else(|| lookup("MDLINKCHECK_IDENTITY"))
                .unwrap_or_else(|| DEFAULT_IDENTITY.to_string()),
            root_path: overrides
                .path
                .or_else(|| lookup("MDLINKCHECK_PATH"))
                .map(|p| p.trim_matches('/').to_string())
                .unwrap_or_default(),
            probe_timeout: PROBE_TIMEOUT,
        })
    }
}
