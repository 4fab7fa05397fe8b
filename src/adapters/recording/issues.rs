//! Recording adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Issue, IssueTracker, PortFuture};

/// Records issue tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIssueTracker {
    /// Creates a new recording issue tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl IssueTracker for RecordingIssueTracker {
    fn list_open<'a>(&'a self, label: &'a str, creator: &'a str) -> PortFuture<'a, Vec<Issue>> {
        Box::pin(async move {
            let result = self.inner.list_open(label, creator).await;
            let input = json!({ "label": label, "creator": creator });
            record_result(&self.recorder, "issues", "list_open", input, &result);
            result
        })
    }

    fn update_body<'a>(&'a self, number: u64, body: &'a str) -> PortFuture<'a, Issue> {
        Box::pin(async move {
            let result = self.inner.update_body(number, body).await;
            let input = json!({ "number": number, "body": body });
            record_result(&self.recorder, "issues", "update_body", input, &result);
            result
        })
    }

    fn create<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        labels: &'a [String],
    ) -> PortFuture<'a, Issue> {
        Box::pin(async move {
            let result = self.inner.create(title, body, labels).await;
            let input = json!({ "title": title, "body": body, "labels": labels });
            record_result(&self.recorder, "issues", "create", input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recording::test_support::finish;
    use crate::testing::FakeIssues;

    #[tokio::test]
    async fn records_create_issue_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            dir.path().join("issues.cassette.yaml"),
            "test",
            "acme/widgets",
        )));

        {
            let tracker = RecordingIssueTracker::new(Box::new(FakeIssues::default()), Arc::clone(&recorder));
            let labels = vec!["link-check".to_string()];
            tracker.create("Report", "Body", &labels).await.unwrap();
        }

        let cassette = finish(recorder);
        let interaction = &cassette.interactions[0];
        assert_eq!(interaction.port, "issues");
        assert_eq!(interaction.method, "create");
        assert_eq!(
            interaction.input,
            json!({"title": "Report", "body": "Body", "labels": ["link-check"]})
        );
        assert_eq!(interaction.output["Ok"]["number"], json!(1));
    }
}
