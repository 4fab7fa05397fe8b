//! In-memory port fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::config::RepoRef;
use crate::context::ServiceContext;
use crate::ports::{
    Clock, ContentEntry, EntryKind, FileContent, Issue, IssueTracker, LinkProbe, PortError,
    PortFuture, RepoContent,
};

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Repository tree held in memory. Bodies are stored base64-encoded, as the
/// hosting API returns them.
#[derive(Default, Clone)]
pub struct FakeContent {
    files: HashMap<String, String>,
    listings: HashMap<String, Vec<ContentEntry>>,
    broken: HashSet<String>,
}

impl FakeContent {
    /// A tree containing `paths`, each with an empty body.
    pub fn with_files(paths: &[&str]) -> Self {
        let mut fake = Self::default();
        for path in paths {
            fake = fake.file(path, "");
        }
        fake
    }

    /// Adds a file with `body` and lists it under its parent directory.
    pub fn file(mut self, path: &str, body: &str) -> Self {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(body);
        self.files.insert(path.to_string(), encoded);
        let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.listings.entry(dir.to_string()).or_default().push(ContentEntry {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::File,
        });
        self
    }

    /// Adds a directory entry under `parent`.
    pub fn dir(mut self, path: &str) -> Self {
        let (parent, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.listings.entry(parent.to_string()).or_default().push(ContentEntry {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::Dir,
        });
        self
    }

    /// Lists `path` but fails every fetch of it.
    pub fn unreadable(mut self, path: &str) -> Self {
        self = self.file(path, "");
        self.broken.insert(path.to_string());
        self
    }

    /// Stores `raw` verbatim as the encoded body of `path`.
    pub fn raw_file(mut self, path: &str, raw: &str) -> Self {
        self = self.file(path, "");
        self.files.insert(path.to_string(), raw.to_string());
        self
    }
}

impl RepoContent for FakeContent {
    fn list_dir<'a>(&'a self, path: &'a str) -> PortFuture<'a, Vec<ContentEntry>> {
        let result = self
            .listings
            .get(path)
            .cloned()
            .ok_or_else(|| -> PortError { format!("no directory at '{path}'").into() });
        Box::pin(async move { result })
    }

    fn get_content<'a>(&'a self, path: &'a str) -> PortFuture<'a, FileContent> {
        let result: Result<_, PortError> = match self.files.get(path) {
            Some(_) if self.broken.contains(path) => Err("server error".into()),
            Some(body) => Ok(FileContent { path: path.to_string(), content: Some(body.clone()) }),
            None if self.listings.contains_key(path) => {
                Ok(FileContent { path: path.to_string(), content: None })
            }
            None => Err("Not Found".into()),
        };
        Box::pin(async move { result })
    }
}

/// Probe answering from a fixed table; unknown URLs fail like a DNS error.
#[derive(Default, Clone)]
pub struct FakeProbe {
    answers: HashMap<String, Result<u16, String>>,
}

impl FakeProbe {
    /// Answers `url` with `code`.
    pub fn status(mut self, url: &str, code: u16) -> Self {
        self.answers.insert(url.to_string(), Ok(code));
        self
    }

    /// Fails `url` with `error`.
    pub fn failure(mut self, url: &str, error: &str) -> Self {
        self.answers.insert(url.to_string(), Err(error.to_string()));
        self
    }
}

impl LinkProbe for FakeProbe {
    fn head<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        let result: Result<_, PortError> = match self.answers.get(url) {
            Some(Ok(code)) => Ok(*code),
            Some(Err(error)) => Err(error.clone().into()),
            None => Err(format!("dns error: failed to lookup address for {url}").into()),
        };
        Box::pin(async move { result })
    }
}

/// A recorded call against [`FakeIssues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueCall {
    /// `list_open(label, creator)`.
    List { label: String, creator: String },
    /// `update_body(number, ..)`.
    Update { number: u64 },
    /// `create(title, .., labels)`.
    Create { title: String, labels: Vec<String> },
}

#[derive(Default)]
struct IssueState {
    open: Vec<(Issue, Vec<String>, String)>,
    calls: Vec<IssueCall>,
    fail_all: bool,
}

/// Issue tracker with shared state, so tests can inspect it after the
/// context that owns a clone is gone.
#[derive(Default, Clone)]
pub struct FakeIssues {
    state: Arc<Mutex<IssueState>>,
}

impl FakeIssues {
    /// Seeds an open issue with `labels`, authored by `creator`.
    pub fn with_open(self, number: u64, labels: &[&str], creator: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.open.push((
                Issue { number, title: format!("issue {number}"), body: Some(String::new()) },
                labels.iter().map(|l| (*l).to_string()).collect(),
                creator.to_string(),
            ));
        }
        self
    }

    /// Makes every call fail.
    pub fn failing(self) -> Self {
        self.state.lock().unwrap().fail_all = true;
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<IssueCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Open issues currently stored.
    pub fn open_issues(&self) -> Vec<Issue> {
        self.state.lock().unwrap().open.iter().map(|(issue, _, _)| issue.clone()).collect()
    }
}

impl IssueTracker for FakeIssues {
    fn list_open<'a>(&'a self, label: &'a str, creator: &'a str) -> PortFuture<'a, Vec<Issue>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(IssueCall::List { label: label.into(), creator: creator.into() });
        let result: Result<_, PortError> = if state.fail_all {
            Err("service unavailable".into())
        } else {
            Ok(state
                .open
                .iter()
                .filter(|(_, labels, author)| {
                    author == creator && labels.iter().any(|l| l == label)
                })
                .map(|(issue, _, _)| issue.clone())
                .collect())
        };
        Box::pin(async move { result })
    }

    fn update_body<'a>(&'a self, number: u64, body: &'a str) -> PortFuture<'a, Issue> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(IssueCall::Update { number });
        let result: Result<_, PortError> = if state.fail_all {
            Err("service unavailable".into())
        } else {
            match state.open.iter_mut().find(|(issue, _, _)| issue.number == number) {
                Some((issue, _, _)) => {
                    issue.body = Some(body.to_string());
                    Ok(issue.clone())
                }
                None => Err(format!("issue #{number} not found").into()),
            }
        };
        Box::pin(async move { result })
    }

    fn create<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        labels: &'a [String],
    ) -> PortFuture<'a, Issue> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(IssueCall::Create { title: title.into(), labels: labels.to_vec() });
        let result: Result<_, PortError> = if state.fail_all {
            Err("service unavailable".into())
        } else {
            let number = state.open.iter().map(|(i, _, _)| i.number).max().unwrap_or(0) + 1;
            let issue = Issue { number, title: title.into(), body: Some(body.into()) };
            state.open.push((issue.clone(), labels.to_vec(), "app".into()));
            Ok(issue)
        };
        Box::pin(async move { result })
    }
}

/// Builder for a [`ServiceContext`] wired to fakes.
pub struct TestContext {
    content: FakeContent,
    probe: FakeProbe,
    issues: FakeIssues,
    identity: String,
}

impl TestContext {
    /// Empty repository `acme/widgets`, no reachable URLs, no issues.
    pub fn new() -> Self {
        Self {
            content: FakeContent::default(),
            probe: FakeProbe::default(),
            issues: FakeIssues::default(),
            identity: "app".into(),
        }
    }

    pub fn content(mut self, content: FakeContent) -> Self {
        self.content = content;
        self
    }

    pub fn probe(mut self, probe: FakeProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn issues(mut self, issues: FakeIssues) -> Self {
        self.issues = issues;
        self
    }

    pub fn build(self) -> ServiceContext {
        ServiceContext {
            repo: RepoRef::new("acme", "widgets"),
            identity: self.identity,
            root_path: String::new(),
            clock: Box::new(FixedClock::default()),
            content: Box::new(self.content),
            probe: Box::new(self.probe),
            issues: Box::new(self.issues),
        }
    }
}
