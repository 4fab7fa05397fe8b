//! Replaying adapter for the Clock port.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a shared cassette replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics if the cassette holds no further clock reading or it does
    /// not decode as a timestamp. A replay that diverges from its
    /// recording cannot continue meaningfully.
    fn now(&self) -> DateTime<Utc> {
        let output = self
            .replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_output("clock", "now")
            .unwrap_or_else(|msg| panic!("{msg}"));
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}
