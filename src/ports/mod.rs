//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the link-check core and an
//! external system (time, repository content, network probes, issues).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod content;
pub mod issues;
pub mod probe;

use std::future::Future;
use std::pin::Pin;

pub use clock::Clock;
pub use content::{ContentEntry, EntryKind, FileContent, RepoContent};
pub use issues::{Issue, IssueTracker};
pub use probe::LinkProbe;

/// Error type returned by every port operation.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by async port methods, keeping the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
