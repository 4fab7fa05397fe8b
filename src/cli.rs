//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Top-level CLI parser for `mdlinkcheck`.
#[derive(Debug, Parser)]
#[command(
    name = "mdlinkcheck",
    version,
    about = "Check markdown links in a hosted repository and track broken ones in an issue"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check every markdown link and publish the report to the tracking issue.
    Check(CheckArgs),
}

/// Arguments for `mdlinkcheck check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Repository owner (defaults to `MDLINKCHECK_OWNER` or `GITHUB_REPOSITORY`).
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (defaults to `MDLINKCHECK_REPO` or `GITHUB_REPOSITORY`).
    #[arg(long)]
    pub repo: Option<String>,

    /// Directory whose markdown files are checked; the root when omitted.
    #[arg(long)]
    pub path: Option<String>,

    /// Login that authors the tracking issue.
    #[arg(long)]
    pub identity: Option<String>,

    /// REST API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print the report instead of publishing it.
    #[arg(long, conflicts_with = "json")]
    pub dry_run: bool,

    /// Print the link records as JSON instead of publishing.
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// The flags that override environment configuration.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            path: self.path.clone(),
            identity: self.identity.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_bare_check() {
        let cli = Cli::parse_from(["mdlinkcheck", "check"]);
        let Command::Check(args) = cli.command;
        assert!(!args.dry_run);
        assert!(!args.json);
        assert!(args.owner.is_none());
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "mdlinkcheck",
            "check",
            "--owner",
            "acme",
            "--repo",
            "widgets",
            "--path",
            "docs",
            "--api-url",
            "http://localhost:8080",
            "--dry-run",
        ]);
        let Command::Check(args) = cli.command;
        let overrides = args.overrides();
        assert_eq!(overrides.owner.as_deref(), Some("acme"));
        assert_eq!(overrides.repo.as_deref(), Some("widgets"));
        assert_eq!(overrides.path.as_deref(), Some("docs"));
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:8080"));
        assert!(args.dry_run);
    }

    #[test]
    fn dry_run_and_json_conflict() {
        let result = Cli::try_parse_from(["mdlinkcheck", "check", "--dry-run", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["mdlinkcheck", "fix"]).is_err());
    }
}
