//! Error types for run-level failures.
//!
//! Link-level failures never show up here: they are captured as data on
//! [`LinkRecord`](crate::links::LinkRecord). This enum covers the failures
//! that end a run.

use thiserror::Error;

use crate::ports::PortError;

/// Errors that abort a link-check run.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}\n  hint: set it via the CLI flag or the matching MDLINKCHECK_* variable")]
    Config(String),

    /// The top-level directory listing could not be fetched.
    #[error("failed to list repository contents at '{path}': {cause}")]
    Listing {
        /// The directory that was listed.
        path: String,
        /// The underlying port failure.
        cause: PortError,
    },

    /// Querying open tracking issues failed.
    #[error("failed to query tracking issues: {0}")]
    IssueQuery(PortError),

    /// Replacing the body of an existing tracking issue failed.
    #[error("failed to update issue #{number}: {cause}")]
    IssueUpdate {
        /// The issue that was being updated.
        number: u64,
        /// The underlying port failure.
        cause: PortError,
    },

    /// Creating the tracking issue failed.
    #[error("failed to create tracking issue: {0}")]
    IssueCreate(PortError),

    /// An HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// A cassette could not be read, parsed, or written.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// Command line arguments were rejected.
    #[error("{0}")]
    Usage(String),

    /// Records could not be serialized for output.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_error_names_the_issue() {
        let err = Error::IssueUpdate { number: 7, cause: "boom".into() };
        assert_eq!(err.to_string(), "failed to update issue #7: boom");
    }

    #[test]
    fn config_error_carries_hint() {
        let err = Error::Config("missing repository owner".into());
        let msg = err.to_string();
        assert!(msg.starts_with("configuration error: missing repository owner"));
        assert!(msg.contains("hint:"));
    }
}
