//! Issue tracker port for the tracking issue.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// An issue as returned by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The tracker-assigned issue number.
    pub number: u64,
    /// The issue title.
    #[serde(default)]
    pub title: String,
    /// The issue body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Manages issues in an external tracker.
pub trait IssueTracker: Send + Sync {
    /// Lists open issues carrying `label` that were opened by `creator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the issues cannot be listed.
    fn list_open<'a>(&'a self, label: &'a str, creator: &'a str) -> PortFuture<'a, Vec<Issue>>;

    /// Replaces the body of issue `number`.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be found or updated.
    fn update_body<'a>(&'a self, number: u64, body: &'a str) -> PortFuture<'a, Issue>;

    /// Opens a new issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created.
    fn create<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        labels: &'a [String],
    ) -> PortFuture<'a, Issue>;
}
