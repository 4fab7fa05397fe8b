//! Command dispatch and handlers.

pub mod check;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<()> {
    match command {
        Command::Check(args) => check::run(args),
    }
}
