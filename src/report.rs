//! Renders link records into the tracking issue body.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::links::{LinkRecord, LinkStatus};

/// Groups records by source file, keeping first-appearance order of files
/// and production order within each file.
fn group_by_file<'a>(
    records: impl Iterator<Item = &'a LinkRecord>,
) -> Vec<(&'a str, Vec<&'a LinkRecord>)> {
    let mut groups: Vec<(&str, Vec<&LinkRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(file, _)| *file == record.filename) {
            Some((_, members)) => members.push(record),
            None => groups.push((&record.filename, vec![record])),
        }
    }
    groups
}

/// Renders the markdown report for one run.
///
/// Broken links come first with their failure detail, followed by valid
/// links when there are any. Repeated links are listed once per occurrence.
#[must_use]
pub fn render(records: &[LinkRecord], checked_at: DateTime<Utc>) -> String {
    let mut body = String::from("## 🔍 Markdown Link Check Results\n\n");
    let _ = writeln!(body, "*Last checked: {}*\n", checked_at.format("%a, %d %b %Y %H:%M:%S GMT"));

    let broken = group_by_file(records.iter().filter(|r| !r.is_valid()));
    if !broken.is_empty() {
        body.push_str("### ❌ Broken Links Found\n\n");
        for (file, links) in &broken {
            let _ = writeln!(body, "**In `{file}`:**");
            for link in links {
                let _ = writeln!(body, "- {}", link.url);
                match &link.status {
                    LinkStatus::InternalNotFound { attempted_path, .. } => {
                        body.push_str("  - Status: Internal link not found\n");
                        let _ = writeln!(body, "  - Attempted path: {attempted_path}");
                    }
                    status => {
                        let _ = writeln!(body, "  - Status: {}", status.label());
                        if let Some(error) = status.error() {
                            let _ = writeln!(body, "  - Error: {error}");
                        }
                    }
                }
            }
            body.push('\n');
        }
    }

    let valid = group_by_file(records.iter().filter(|r| r.is_valid()));
    if !valid.is_empty() {
        body.push_str("### ✅ Valid Links\n\n");
        for (file, links) in &valid {
            let _ = writeln!(body, "**In `{file}`:**");
            for link in links {
                match &link.status {
                    LinkStatus::InternalAnchor => {
                        let _ = writeln!(body, "- {} (Anchor Link)", link.url);
                    }
                    LinkStatus::InternalOk { resolved_path } => {
                        let _ = writeln!(body, "- {} → {resolved_path}", link.url);
                    }
                    _ => {
                        let _ = writeln!(body, "- {}", link.url);
                    }
                }
            }
            body.push('\n');
        }
    }

    body.push_str("*Generated by Link Checker* 🤖");
    body
}
