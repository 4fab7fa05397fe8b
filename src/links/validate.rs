//! Turns a raw link into a [`LinkRecord`].

use tracing::debug;

use super::classify::{classify, Classified};
use super::record::{LinkRecord, LinkStatus, NOT_FOUND_MESSAGE};
use crate::context::ServiceContext;

/// Classifies and checks one link found in `source_file`.
///
/// Never fails: lookup and probe errors are recorded on the returned
/// record. Anchors are resolved without any I/O.
pub async fn validate(ctx: &ServiceContext, link: &str, source_file: &str) -> LinkRecord {
    let status = match classify(link, source_file, &ctx.repo) {
        Classified::Anchor => LinkStatus::InternalAnchor,
        Classified::Internal { path } => check_internal(ctx, path).await,
        Classified::External { url } => check_external(ctx, &url).await,
    };
    debug!(link, file = source_file, status = %status.label(), "checked link");
    LinkRecord::new(link, source_file, status)
}

/// Any fetch failure, not just a 404, counts as not found. A path that
/// climbs above the repository root is not found without a lookup.
async fn check_internal(ctx: &ServiceContext, path: String) -> LinkStatus {
    if path.split('/').any(|segment| segment == "..") {
        debug!(path = %path, "path leaves the repository");
        return LinkStatus::InternalNotFound {
            attempted_path: path,
            error: NOT_FOUND_MESSAGE.to_string(),
        };
    }
    match ctx.content.get_content(&path).await {
        Ok(_) => LinkStatus::InternalOk { resolved_path: path },
        Err(err) => {
            debug!(path = %path, error = %err, "internal lookup failed");
            LinkStatus::InternalNotFound {
                attempted_path: path,
                error: NOT_FOUND_MESSAGE.to_string(),
            }
        }
    }
}

async fn check_external(ctx: &ServiceContext, url: &str) -> LinkStatus {
    match ctx.probe.head(url).await {
        Ok(code) => LinkStatus::External { code },
        Err(err) => LinkStatus::Unreachable { error: err.to_string() },
    }
}
