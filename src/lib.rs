//! Core library entry for the `mdlinkcheck` CLI.
//!
//! Walks the markdown files of a hosted repository, checks every link they
//! contain, and keeps a single tracking issue listing the broken ones.

pub mod adapters;
pub mod cassette;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod links;
pub mod ports;
pub mod reconcile;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Help and version requests are printed and count as success.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };
    commands::dispatch(&cli.command)
}
