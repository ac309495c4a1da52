use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::project::Status;
use crate::query::{ListFilter, Ownership, SortOrder};
use crate::scan::ScanOptions;

#[derive(Parser, Debug)]
#[command(name = "prj")]
#[command(version)]
#[command(about = "Local project tracker - discover git repositories and query their metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding config.json and projects.json (default: $PRJ_HOME or ~/.prj)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Track a parent folder to scan for repositories
    Add {
        #[arg(value_name = "FOLDER")]
        folder: String,
    },

    /// Stop tracking a folder
    Remove {
        #[arg(value_name = "FOLDER")]
        folder: String,
    },

    /// Print the current configuration
    Config,

    /// Discover repositories and refresh their metadata
    Scan(ScanArgs),

    /// List projects
    List(ListArgs),

    /// Show everything known about one project
    Info {
        /// Project name; exact match first, then partial, case-insensitive
        #[arg(value_name = "NAME")]
        name: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Summary dashboard
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Extract and report without saving
    #[arg(long)]
    pub dry_run: bool,

    /// Remove records whose repository is gone or no longer under a tracked folder
    #[arg(long)]
    pub prune: bool,

    /// Extraction workers (default: from config, else CPU count)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,
}

impl ScanArgs {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            dry_run: self.dry_run,
            prune: self.prune,
            jobs: self.jobs.map(usize::from),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only projects with this status
    #[arg(short, long)]
    pub status: Option<Status>,

    /// Project type contains this text (e.g. next, rust, docs)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Any tech tag contains this text
    #[arg(long, value_name = "TECH")]
    pub tech: Option<String>,

    /// Only projects that are not forks
    #[arg(long, conflicts_with = "forks")]
    pub own: bool,

    /// Only forks of someone else's repository
    #[arg(long)]
    pub forks: bool,

    /// Name or path contains this text
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, default_value = "date")]
    pub sort: SortOrder,

    /// Output format
    #[arg(short = 'f', long, default_value = "table")]
    pub format: OutputFormat,
}

impl ListArgs {
    pub fn to_filter(&self) -> ListFilter {
        let ownership = if self.own {
            Ownership::Own
        } else if self.forks {
            Ownership::Forks
        } else {
            Ownership::Any
        };
        ListFilter {
            status: self.status,
            kind: self.kind.clone(),
            tech: self.tech.clone(),
            ownership,
            search: self.search.clone(),
        }
    }
}
