//! Command-line interface
//!
//! Argument parsing stays here; every command resolves its settings from the
//! [Context] built once from the configuration file and the global flags.

mod jira;
mod report;
mod versions;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use crate::config::{load_config, Config};

pub use jira::{JiraArgs, JiraCommand};
pub use report::ReportArgs;
pub use versions::VersionsCommand;

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("Not a valid date: '{}'.", s))
}

#[derive(Debug, Parser)]
#[command(
    name = "sirem",
    version,
    about = "Track release versions and milestones, mirror them to Jira and report release candidates"
)]
pub struct Cli {
    /// Verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path of the versions file [default: VERSIONS.yaml]
    #[arg(short = 'f', long, global = true)]
    pub versions_file: Option<PathBuf>,

    /// Custom configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, remove and edit tracked versions
    Versions {
        #[command(subcommand)]
        command: VersionsCommand,
    },

    /// Mirror versions to Jira and import their scope
    Jira(JiraArgs),

    /// Report milestones, scope and release candidate status
    Report(ReportArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub config: Config,
    pub versions_file: PathBuf,
}

impl Context {
    /// `versions_file` overrides the configured versions file when given
    pub fn new(config: Config, versions_file: Option<PathBuf>) -> Self {
        let versions_file = versions_file.unwrap_or_else(|| config.versions_file.clone());
        Context {
            config,
            versions_file,
        }
    }
}

/// Install the stderr log subscriber for the given `-v` count
pub fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Load the configuration and dispatch the selected command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let ctx = Context::new(config, cli.versions_file);
    tracing::debug!(versions_file = %ctx.versions_file.display(), "resolved context");

    match cli.command {
        Command::Versions { command } => command.run(&ctx),
        Command::Jira(args) => args.run(&ctx),
        Command::Report(args) => args.run(&ctx),
    }
}
