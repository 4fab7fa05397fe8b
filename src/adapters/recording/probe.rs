//! Recording adapter for the `LinkProbe` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{LinkProbe, PortFuture};

/// Records probe outcomes while delegating to an inner implementation.
pub struct RecordingProbe {
    inner: Box<dyn LinkProbe>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProbe {
    /// Creates a new recording probe wrapping the given implementation.
    pub fn new(inner: Box<dyn LinkProbe>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LinkProbe for RecordingProbe {
    fn head<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let result = self.inner.head(url).await;
            record_result(&self.recorder, "probe", "head", json!({ "url": url }), &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recording::test_support::finish;
    use crate::testing::FakeProbe;

    #[tokio::test]
    async fn records_status_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            dir.path().join("probe.cassette.yaml"),
            "test",
            "acme/widgets",
        )));

        {
            let fake = FakeProbe::default()
                .status("https://a.test", 301)
                .failure("https://b.test", "dns error");
            let probe = RecordingProbe::new(Box::new(fake), Arc::clone(&recorder));
            assert_eq!(probe.head("https://a.test").await.unwrap(), 301);
            assert!(probe.head("https://b.test").await.is_err());
        }

        let cassette = finish(recorder);
        assert_eq!(cassette.interactions[0].output, json!({"Ok": 301}));
        assert_eq!(cassette.interactions[1].output, json!({"Err": "dns error"}));
    }
}
