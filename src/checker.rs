//! Runs the link checks across a repository's markdown files.

use base64::Engine as _;
use futures::future::join_all;
use tracing::{info, warn};

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::links::{extract_links, validate, LinkRecord};
use crate::ports::{FileContent, PortError};

/// Checks every markdown file directly under the configured root.
///
/// Files are processed one at a time; the links within a file are checked
/// concurrently. A file that cannot be fetched or decoded is logged and
/// skipped. Records come back in file order, then link order.
///
/// # Errors
///
/// Returns an error only if the root directory cannot be listed.
pub async fn check_repository(ctx: &ServiceContext) -> Result<Vec<LinkRecord>> {
    let root = ctx.root_path.as_str();
    info!(repository = %ctx.repo.full_name(), root, "checking markdown links");

    let entries = ctx
        .content
        .list_dir(root)
        .await
        .map_err(|cause| Error::Listing { path: root.to_string(), cause })?;
    let markdown: Vec<_> = entries.into_iter().filter(|e| e.is_markdown_file()).collect();
    if markdown.is_empty() {
        info!("no markdown files found");
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for file in &markdown {
        match check_file(ctx, &file.path).await {
            Ok(found) => {
                info!(file = %file.path, links = found.len(), "checked file");
                records.extend(found);
            }
            Err(err) => warn!(file = %file.path, error = %err, "skipping file"),
        }
    }
    Ok(records)
}

/// Fetches one markdown file and checks all of its links.
///
/// # Errors
///
/// Returns an error if the file cannot be fetched or its body cannot be decoded.
pub async fn check_file(ctx: &ServiceContext, path: &str) -> Result<Vec<LinkRecord>, PortError> {
    let file = ctx.content.get_content(path).await?;
    let text = decode_content(&file)?;
    Ok(check_markdown(ctx, &text, path).await)
}

/// Checks every link in `markdown`, which was read from `filename`.
pub async fn check_markdown(ctx: &ServiceContext, markdown: &str, filename: &str) -> Vec<LinkRecord> {
    let links = extract_links(markdown);
    join_all(links.iter().map(|link| validate(ctx, link, filename))).await
}

/// Decodes the base64 body of a fetched file. Line breaks inside the
/// encoding are ignored; invalid UTF-8 is replaced rather than rejected.
fn decode_content(file: &FileContent) -> Result<String, PortError> {
    let encoded = file
        .content
        .as_deref()
        .ok_or_else(|| -> PortError { format!("no content returned for '{}'", file.path).into() })?;
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| -> PortError { format!("invalid base64 in '{}': {e}", file.path).into() })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
