//! Recording adapter for the `RepoContent` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ContentEntry, FileContent, PortFuture, RepoContent};

/// Records content lookups while delegating to an inner implementation.
pub struct RecordingContent {
    inner: Box<dyn RepoContent>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingContent {
    /// Creates a new recording content port wrapping the given implementation.
    pub fn new(inner: Box<dyn RepoContent>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RepoContent for RecordingContent {
    fn list_dir<'a>(&'a self, path: &'a str) -> PortFuture<'a, Vec<ContentEntry>> {
        Box::pin(async move {
            let result = self.inner.list_dir(path).await;
            record_result(&self.recorder, "content", "list_dir", json!({ "path": path }), &result);
            result
        })
    }

    fn get_content<'a>(&'a self, path: &'a str) -> PortFuture<'a, FileContent> {
        Box::pin(async move {
            let result = self.inner.get_content(path).await;
            record_result(&self.recorder, "content", "get_content", json!({ "path": path }), &result);
            result
        })
    }
}
