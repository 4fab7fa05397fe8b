//! Replaying adapter for the `RepoContent` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ContentEntry, FileContent, PortFuture, RepoContent};

/// Serves recorded listings and lookups from a cassette.
pub struct ReplayingContent {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingContent {
    /// Creates a replaying content port backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl RepoContent for ReplayingContent {
    fn list_dir<'a>(&'a self, path: &'a str) -> PortFuture<'a, Vec<ContentEntry>> {
        let result = replay_result(&self.replayer, "content", "list_dir", &json!({ "path": path }));
        Box::pin(async move { result })
    }

    fn get_content<'a>(&'a self, path: &'a str) -> PortFuture<'a, FileContent> {
        let result =
            replay_result(&self.replayer, "content", "get_content", &json!({ "path": path }));
        Box::pin(async move { result })
    }
}
