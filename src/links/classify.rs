//! Decides what a raw link points at.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::{RepoRef, HOSTING_DOMAIN};

/// Captures the file path after `/blob/<ref>/` in a hosted file URL.
static BLOB_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/blob/[^/]+/(.+)$").expect("blob path pattern is valid"));

/// What kind of target a link has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// `#fragment` within the same document.
    Anchor,
    /// A path inside the checked repository.
    Internal {
        /// Normalized, repository-relative target path.
        path: String,
    },
    /// Anything reachable only over the network.
    External {
        /// The URL to probe.
        url: String,
    },
}

/// Classifies `link`, found in `source_file`, against the repository `repo`.
///
/// Links that parse as absolute URLs are external, except hosted blob URLs
/// that name this repository: those are checked as internal paths so a link
/// pinned to another branch is still verified against the tree. Links that
/// do not parse as URLs are always internal and resolve relative to the
/// source file's directory.
#[must_use]
pub fn classify(link: &str, source_file: &str, repo: &RepoRef) -> Classified {
    if link.starts_with('#') {
        return Classified::Anchor;
    }

    match Url::parse(link) {
        Ok(url) => {
            if let Some(path) = same_repo_path(link, &url, repo) {
                return Classified::Internal { path };
            }
            Classified::External { url: link.to_string() }
        }
        Err(_) => Classified::Internal { path: resolve_relative(source_file, link) },
    }
}

/// Extracts the repository path from a hosted blob URL pointing at `repo`.
fn same_repo_path(link: &str, url: &Url, repo: &RepoRef) -> Option<String> {
    let host = url.host_str()?;
    let on_host = host == HOSTING_DOMAIN || host.ends_with(&format!(".{HOSTING_DOMAIN}"));
    if !on_host || !link.contains(&repo.owner) || !link.contains(&repo.name) {
        return None;
    }
    BLOB_PATH.captures(url.path()).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Resolves `link` against the directory of `source_file`.
///
/// Always uses `/` separators and collapses `.` and `..` segments. A `..`
/// that climbs above the repository root is kept, so the lookup fails
/// instead of silently landing on another file. Any `#fragment` or `?query`
/// suffix is dropped first, so `a.md#usage` looks up `a.md` rather than a
/// file literally named `a.md#usage` as a plain path join would.
///
/// ```
/// use mdlinkcheck::links::resolve_relative;
///
/// assert_eq!(resolve_relative("docs/index.md", "./a.md"), "docs/a.md");
/// assert_eq!(resolve_relative("docs/sub/index.md", "../b.md"), "docs/b.md");
/// assert_eq!(resolve_relative("README.md", "guide.md#usage"), "guide.md");
/// ```
#[must_use]
pub fn resolve_relative(source_file: &str, link: &str) -> String {
    let target = link.split(['#', '?']).next().unwrap_or_default();
    let base = source_file.replace('\\', "/");
    let dir = base.rsplit_once('/').map_or("", |(dir, _)| dir);

    let mut segments: Vec<&str> = Vec::new();
    let joined = format!("{dir}/{}", target.replace('\\', "/"));
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef::new("acme", "widgets")
    }

    #[test]
    fn hash_prefix_is_anchor() {
        assert_eq!(classify("#install", "README.md", &repo()), Classified::Anchor);
        assert_eq!(classify("#", "docs/a.md", &repo()), Classified::Anchor);
    }

    #[test]
    fn relative_paths_resolve_against_source_directory() {
        assert_eq!(resolve_relative("docs/index.md", "./a.md"), "docs/a.md");
        assert_eq!(resolve_relative("docs/sub/index.md", "../b.md"), "docs/b.md");
        assert_eq!(resolve_relative("README.md", "./missing.md"), "missing.md");
        assert_eq!(resolve_relative("README.md", "docs/guide.md"), "docs/guide.md");
        assert_eq!(resolve_relative("docs/a/b.md", "./x/../y/./z.md"), "docs/a/y/z.md");
    }

    #[test]
    fn resolution_is_idempotent_on_normalized_paths() {
        let once = resolve_relative("docs/index.md", "./a.md");
        assert_eq!(resolve_relative("README.md", &once), once);
    }

    #[test]
    fn parent_segments_above_root_are_kept() {
        assert_eq!(resolve_relative("README.md", "../other/a.md"), "../other/a.md");
        assert_eq!(resolve_relative("docs/a.md", "../../x.md"), "../x.md");
    }

    #[test]
    fn leading_slash_resolves_from_source_directory() {
        assert_eq!(resolve_relative("README.md", "/docs/a.md"), "docs/a.md");
        assert_eq!(resolve_relative("docs/index.md", "/a.md"), "docs/a.md");
    }

    #[test]
    fn fragment_and_query_are_dropped() {
        assert_eq!(resolve_relative("docs/index.md", "./a.md#usage"), "docs/a.md");
        assert_eq!(resolve_relative("docs/index.md", "b.md?plain=1"), "docs/b.md");
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        assert_eq!(resolve_relative("docs\\index.md", ".\\img\\a.png"), "docs/img/a.png");
    }

    #[test]
    fn unparseable_links_are_internal() {
        assert_eq!(
            classify("./missing.md", "README.md", &repo()),
            Classified::Internal { path: "missing.md".into() }
        );
        assert_eq!(
            classify("CONTRIBUTING.md", "docs/index.md", &repo()),
            Classified::Internal { path: "docs/CONTRIBUTING.md".into() }
        );
    }

    #[test]
    fn absolute_urls_are_external() {
        assert_eq!(
            classify("https://example.com", "README.md", &repo()),
            Classified::External { url: "https://example.com".into() }
        );
        assert_eq!(
            classify("https://github.com/other/project", "README.md", &repo()),
            Classified::External { url: "https://github.com/other/project".into() }
        );
    }

    #[test]
    fn same_repo_blob_urls_are_internal() {
        assert_eq!(
            classify(
                "https://github.com/acme/widgets/blob/main/docs/setup.md",
                "README.md",
                &repo()
            ),
            Classified::Internal { path: "docs/setup.md".into() }
        );
        assert_eq!(
            classify(
                "https://github.com/acme/widgets/blob/v1.2/README.md#intro",
                "docs/a.md",
                &repo()
            ),
            Classified::Internal { path: "README.md".into() }
        );
    }

    #[test]
    fn same_repo_urls_without_blob_segment_stay_external() {
        let link = "https://github.com/acme/widgets/issues/3";
        assert_eq!(
            classify(link, "README.md", &repo()),
            Classified::External { url: link.into() }
        );
    }

    #[test]
    fn blob_urls_on_other_hosts_stay_external() {
        let link = "https://gitlab.com/acme/widgets/blob/main/a.md";
        assert_eq!(
            classify(link, "README.md", &repo()),
            Classified::External { url: link.into() }
        );
    }
}
