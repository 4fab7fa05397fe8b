//! Accumulates port traffic and writes it out as one cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Builds a [`Cassette`] in memory and writes it as YAML on [`finish`](Self::finish).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette for `repository` that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>, name: &str, repository: &str) -> Self {
        Self {
            path: path.into(),
            cassette: Cassette {
                name: name.to_string(),
                recorded_at: Utc::now(),
                repository: repository.to_string(),
                interactions: Vec::new(),
            },
        }
    }

    /// Appends one interaction; its `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: &str,
        method: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Stamps the cassette with the current time and writes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(mut self) -> Result<PathBuf, std::io::Error> {
        self.cassette.recorded_at = Utc::now();
        let yaml = serde_yaml::to_string(&self.cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
