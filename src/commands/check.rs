//! `mdlinkcheck check` command.

use std::env;
use std::path::PathBuf;

use tracing::{error, info};

use crate::cassette::session::RecordingSession;
use crate::checker::check_repository;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::reconcile::{reconcile, ReconcileOutcome};
use crate::report;

/// Environment variable naming a directory to record port traffic into.
pub const RECORD_ENV: &str = "MDLINKCHECK_RECORD";

/// What to do with the records once the check has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Reconcile the tracking issue.
    Publish,
    /// Print the rendered report.
    DryRun,
    /// Print the records as JSON.
    Json,
}

impl From<&CheckArgs> for Output {
    fn from(args: &CheckArgs) -> Self {
        if args.json {
            Self::Json
        } else if args.dry_run {
            Self::DryRun
        } else {
            Self::Publish
        }
    }
}

/// Execute the `check` command.
///
/// When `MDLINKCHECK_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the repository cannot
/// be listed, or the tracking issue cannot be reconciled.
pub fn run(args: &CheckArgs) -> Result<()> {
    let config = Config::from_env(args.overrides())?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let (ctx, session) = match env::var(RECORD_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let (ctx, session) = ServiceContext::recording_at(&config, PathBuf::from(dir))?;
            (ctx, Some(session))
        }
        _ => (ServiceContext::live(&config)?, None),
    };

    let result = runtime.block_on(execute(&ctx, Output::from(args)));

    // Finish recording after the command completes, even on error.
    let result = match session {
        Some(session) => {
            drop(ctx);
            finish_recording(session, result)
        }
        None => result,
    };

    println!("{}", result?);
    Ok(())
}

/// Writes the cassettes, then hands back the run's own result.
///
/// A failed run wins over a failed write; the write failure is only logged.
fn finish_recording(session: RecordingSession, result: Result<String>) -> Result<String> {
    match session.finish() {
        Ok(dir) => {
            eprintln!("Recording saved to: {}", dir.display());
            result
        }
        Err(err) if result.is_err() => {
            error!(error = %err, "failed to save recording");
            result
        }
        Err(err) => Err(err),
    }
}

/// Checks the repository behind `ctx` and returns the text to print.
///
/// # Errors
///
/// Returns an error if the repository cannot be listed or, when publishing,
/// the tracking issue cannot be reconciled.
pub async fn execute(ctx: &ServiceContext, output: Output) -> Result<String> {
    let records = check_repository(ctx).await?;
    let broken = records.iter().filter(|r| !r.is_valid()).count();
    info!(checked = records.len(), broken, "link check finished");

    match output {
        Output::Json => Ok(serde_json::to_string_pretty(&records)?),
        Output::DryRun => Ok(report::render(&records, ctx.clock.now())),
        Output::Publish => Ok(match reconcile(ctx, &records).await? {
            ReconcileOutcome::Clean => format!("All {} links are valid.", records.len()),
            ReconcileOutcome::Updated { number } => {
                format!("{broken} broken link(s); updated tracking issue #{number}.")
            }
            ReconcileOutcome::Created { number } => {
                format!("{broken} broken link(s); opened tracking issue #{number}.")
            }
        }),
    }
}
