//! Pulls raw link destinations out of markdown text.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

/// Returns the destination of every link and image in `markdown`, in document order.
///
/// Reference-style links are returned with their resolved destination.
/// Email autolinks and empty destinations are skipped. Repeated links are
/// returned once per occurrence.
#[must_use]
pub fn extract_links(markdown: &str) -> Vec<String> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    Parser::new_ext(markdown, options)
        .filter_map(|event| match event {
            Event::Start(
                Tag::Link { link_type, dest_url, .. } | Tag::Image { link_type, dest_url, .. },
            ) if link_type != LinkType::Email && !dest_url.is_empty() => Some(dest_url.to_string()),
            _ => None,
        })
        .collect()
}
