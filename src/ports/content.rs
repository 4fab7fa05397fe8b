//! Repository content port for listing and fetching files.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Whether a listed entry is a file or something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
    /// A symlink.
    Symlink,
    /// A git submodule.
    Submodule,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// The entry's file name.
    pub name: String,
    /// Repository-relative path of the entry.
    pub path: String,
    /// The entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl ContentEntry {
    /// Returns `true` for regular files whose name ends in `.md`.
    #[must_use]
    pub fn is_markdown_file(&self) -> bool {
        self.kind == EntryKind::File && self.name.ends_with(".md")
    }
}

/// A single fetched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// Repository-relative path that was fetched.
    pub path: String,
    /// Base64-encoded body, possibly wrapped with newlines.
    ///
    /// Absent for entries the content service does not inline (e.g. very
    /// large files or directories).
    #[serde(default)]
    pub content: Option<String>,
}

/// Read access to a repository's file tree.
///
/// Any error from [`RepoContent::get_content`] is treated by callers as
/// "the path does not exist"; adapters do not need to distinguish a 404
/// from a transport failure.
pub trait RepoContent: Send + Sync {
    /// Lists the entries directly under `path` (`""` is the repository root).
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir<'a>(&'a self, path: &'a str) -> PortFuture<'a, Vec<ContentEntry>>;

    /// Fetches the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be fetched.
    fn get_content<'a>(&'a self, path: &'a str) -> PortFuture<'a, FileContent>;
}
