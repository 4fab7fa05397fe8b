//! Replaying adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Issue, IssueTracker, PortFuture};

/// Serves recorded issue tracker results from a cassette.
///
/// Requests must match the recording exactly, body included, so a replay
/// also verifies what would have been published.
pub struct ReplayingIssueTracker {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingIssueTracker {
    /// Create a replaying issue tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn list_open<'a>(&'a self, label: &'a str, creator: &'a str) -> PortFuture<'a, Vec<Issue>> {
        let input = json!({ "label": label, "creator": creator });
        let result = replay_result(&self.replayer, "issues", "list_open", &input);
        Box::pin(async move { result })
    }

    fn update_body<'a>(&'a self, number: u64, body: &'a str) -> PortFuture<'a, Issue> {
        let input = json!({ "number": number, "body": body });
        let result = replay_result(&self.replayer, "issues", "update_body", &input);
        Box::pin(async move { result })
    }

    fn create<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        labels: &'a [String],
    ) -> PortFuture<'a, Issue> {
        let input = json!({ "title": title, "body": body, "labels": labels });
        let result = replay_result(&self.replayer, "issues", "create", &input);
        Box::pin(async move { result })
    }
}
