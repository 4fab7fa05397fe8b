//! Keeps exactly one open tracking issue in step with the latest report.
//!
//! The issue is found by label and author. Its body is replaced wholesale
//! on every run that found broken links; a clean run publishes nothing.

use tracing::{info, warn};

use crate::config::{TRACKING_LABEL, TRACKING_TITLE};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::links::LinkRecord;
use crate::report;

/// What [`reconcile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No broken links; the tracker was not touched.
    Clean,
    /// The existing tracking issue got a new body.
    Updated {
        /// Number of the updated issue.
        number: u64,
    },
    /// A new tracking issue was opened.
    Created {
        /// Number of the new issue.
        number: u64,
    },
}

/// Publishes the report for `records` if any of them is broken.
///
/// When several open issues match, the first one returned is updated and
/// the rest are left alone.
///
/// # Errors
///
/// Returns an error if querying, updating, or creating the issue fails.
/// Nothing is retried.
pub async fn reconcile(ctx: &ServiceContext, records: &[LinkRecord]) -> Result<ReconcileOutcome> {
    let broken = records.iter().filter(|r| !r.is_valid()).count();
    if broken == 0 {
        info!(checked = records.len(), "no broken links, leaving tracking issue untouched");
        return Ok(ReconcileOutcome::Clean);
    }

    let existing =
        ctx.issues.list_open(TRACKING_LABEL, &ctx.identity).await.map_err(Error::IssueQuery)?;
    let body = report::render(records, ctx.clock.now());

    match existing.first() {
        Some(issue) => {
            if existing.len() > 1 {
                let numbers: Vec<u64> = existing.iter().map(|i| i.number).collect();
                warn!(?numbers, "multiple open tracking issues, updating the first");
            }
            let number = issue.number;
            ctx.issues
                .update_body(number, &body)
                .await
                .map_err(|cause| Error::IssueUpdate { number, cause })?;
            info!(number, broken, "updated tracking issue");
            Ok(ReconcileOutcome::Updated { number })
        }
        None => {
            let labels = [TRACKING_LABEL.to_string()];
            let issue = ctx
                .issues
                .create(TRACKING_TITLE, &body, &labels)
                .await
                .map_err(Error::IssueCreate)?;
            info!(number = issue.number, broken, "created tracking issue");
            Ok(ReconcileOutcome::Created { number: issue.number })
        }
    }
}
