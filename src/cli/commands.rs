//! CLI commands and argument parsing

use crate::api::IssueState;
use crate::types::SortOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated GitLab listings from the command line
#[derive(Parser, Debug)]
#[command(name = "gitlab-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root, e.g. https://gitlab.com/api/v4
    #[arg(long, global = true, env = "GITLAB_URL")]
    pub base_url: Option<String>,

    /// Page size
    #[arg(long, global = true, env = "GITLAB_PER_PAGE")]
    pub per_page: Option<u32>,

    /// How the listing is consumed
    #[arg(short, long, global = true, default_value = "scan")]
    pub mode: ScanMode,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects
    Projects {
        /// Use keyset pagination
        #[arg(long)]
        keyset: bool,

        /// Only projects the caller is a member of
        #[arg(long, conflicts_with = "owned")]
        membership: bool,

        /// Only projects owned by the caller
        #[arg(long)]
        owned: bool,

        /// Search term
        #[arg(long)]
        search: Option<String>,

        /// Ordering field
        #[arg(long)]
        order_by: Option<String>,

        /// Sort direction
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List issues of a project
    Issues {
        /// Project ID or full path (group/project)
        project: String,

        /// Issue state
        #[arg(long, default_value = "opened")]
        state: IssueState,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Consumption idiom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScanMode {
    /// Items only; the terminating error is checked after the stream ends
    #[default]
    Scan,
    /// Items paired with errors
    Paired,
    /// Collect everything, or fail
    Collect,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
