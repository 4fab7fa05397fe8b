//! Recording session managing per-port cassette recorders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to `<dir>/<port>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for repository content interactions.
    pub content: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for external probe interactions.
    pub probe: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for issue tracker interactions.
    pub issues: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session writing into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `output_dir` already holds cassettes or cannot be created.
    pub fn new(output_dir: PathBuf, repository: &str) -> Result<Self> {
        if output_dir.join("content.cassette.yaml").exists() {
            return Err(Error::Cassette(format!(
                "cassettes already recorded in {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            Error::Cassette(format!("failed to create {}: {e}", output_dir.display()))
        })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, &name, repository)))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            content: make_recorder("content"),
            probe: make_recorder("probe"),
            issues: make_recorder("issues"),
            output_dir,
        })
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// The context that used this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<()> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| {
                    Error::Cassette(format!("recording adapter for {port} still has references"))
                })?
                .into_inner()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            recorder
                .finish()
                .map_err(|e| Error::Cassette(format!("failed to write {port} cassette: {e}")))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.content, "content")?;
        finish_one(self.probe, "probe")?;
        finish_one(self.issues, "issues")?;

        Ok(self.output_dir)
    }
}
