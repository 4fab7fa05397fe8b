//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod content;
pub mod issues;
pub mod probe;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

pub use clock::ReplayingClock;
pub use content::ReplayingContent;
pub use issues::ReplayingIssueTracker;
pub use probe::ReplayingProbe;

/// Looks up the recorded output whose input equals `input` and decodes it
/// using the Ok/Err convention written by the recording adapters.
pub(crate) fn replay_result<T: DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
    input: &serde_json::Value,
) -> Result<T, PortError> {
    let output = replayer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .matching_output(port, method, input)?;

    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| format!("{port}::{method}: failed to deserialize recorded output: {e}").into())
}
