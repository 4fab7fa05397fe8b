//! Replaying adapter for the `LinkProbe` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{LinkProbe, PortFuture};

/// Serves recorded probe outcomes from a cassette.
pub struct ReplayingProbe {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingProbe {
    /// Creates a replaying probe backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl LinkProbe for ReplayingProbe {
    fn head<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        let result = replay_result(&self.replayer, "probe", "head", &json!({ "url": url }));
        Box::pin(async move { result })
    }
}
