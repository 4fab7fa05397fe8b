//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{GitHubClient, HttpProbe, LiveClock};
use crate::adapters::recording::{
    RecordingClock, RecordingContent, RecordingIssueTracker, RecordingProbe,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingContent, ReplayingIssueTracker, ReplayingProbe,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{Config, RepoRef};
use crate::error::{Error, Result};
use crate::ports::{Clock, IssueTracker, LinkProbe, RepoContent};

/// Bundles the repository identity and every port a run talks to.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying); tests can assemble one directly from fakes.
pub struct ServiceContext {
    /// The repository being checked.
    pub repo: RepoRef,
    /// Login that authors the tracking issue.
    pub identity: String,
    /// Directory whose markdown files are checked (`""` is the root).
    pub root_path: String,
    /// Clock for the report timestamp.
    pub clock: Box<dyn Clock>,
    /// Repository file listing and lookup.
    pub content: Box<dyn RepoContent>,
    /// External URL probe.
    pub probe: Box<dyn LinkProbe>,
    /// Tracking issue storage.
    pub issues: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Creates a live context talking to the hosting platform and the network.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self> {
        let github = GitHubClient::new(config)?;
        Ok(Self {
            repo: config.repo.clone(),
            identity: config.identity.clone(),
            root_path: config.root_path.clone(),
            clock: Box::new(LiveClock),
            content: Box::new(github.clone()),
            probe: Box::new(HttpProbe::new(config.probe_timeout)?),
            issues: Box::new(github),
        })
    }

    /// Creates a live context whose port traffic is captured into `dir`.
    ///
    /// Returns the session alongside; call [`RecordingSession::finish`] after
    /// dropping the context to write the cassette files.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be prepared or a client
    /// cannot be built.
    pub fn recording_at(config: &Config, dir: PathBuf) -> Result<(Self, RecordingSession)> {
        let session = RecordingSession::new(dir, &config.repo.full_name())?;
        let live = Self::live(config)?;
        let ctx = Self {
            repo: live.repo,
            identity: live.identity,
            root_path: live.root_path,
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            content: Box::new(RecordingContent::new(live.content, Arc::clone(&session.content))),
            probe: Box::new(RecordingProbe::new(live.probe, Arc::clone(&session.probe))),
            issues: Box::new(RecordingIssueTracker::new(live.issues, Arc::clone(&session.issues))),
        };
        Ok((ctx, session))
    }

    /// Creates a context that serves every port from recorded cassettes.
    ///
    /// All cassettes are merged into one interaction pool, so a single
    /// monolithic file and a directory of per-port files work the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette cannot be read or parsed.
    pub fn replaying(
        repo: RepoRef,
        identity: impl Into<String>,
        cassettes: &[PathBuf],
    ) -> Result<Self> {
        let mut merged: Option<Cassette> = None;
        for path in cassettes {
            let cassette = load_cassette(path)?;
            match merged.as_mut() {
                Some(all) => all.interactions.extend(cassette.interactions),
                None => merged = Some(cassette),
            }
        }
        let merged = merged.ok_or_else(|| Error::Cassette("no cassette files given".into()))?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&merged)));

        Ok(Self {
            repo,
            identity: identity.into(),
            root_path: String::new(),
            clock: Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            content: Box::new(ReplayingContent::new(Arc::clone(&replayer))),
            probe: Box::new(ReplayingProbe::new(Arc::clone(&replayer))),
            issues: Box::new(ReplayingIssueTracker::new(replayer)),
        })
    }
}

fn load_cassette(path: &Path) -> Result<Cassette> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Cassette(format!("failed to read {}: {e}", path.display())))?;
    serde_yaml::from_str(&content)
        .map_err(|e| Error::Cassette(format!("failed to parse {}: {e}", path.display())))
}
