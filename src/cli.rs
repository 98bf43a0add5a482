//! CLI argument definitions for eventcheck.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eventcheck")]
#[command(version)]
#[command(about = "Normalize and verify event organizer submissions", long_about = None)]
#[command(
    after_help = "INPUT:\n    A JSON or YAML array of submission records (origin_org, title, twitter, website, ...).\n\n    eventcheck check submissions.json\n    eventcheck export submissions.json --audience public --reconcile --output public.json"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./eventcheck.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize submissions and print each record's review labels
    Check {
        /// Submissions file (.json, .yaml or .yml)
        input: PathBuf,
    },
    /// Confirm Twitter handles against the lookup service
    Reconcile {
        /// Submissions file (.json, .yaml or .yml)
        input: PathBuf,
        /// Also probe website reachability
        #[arg(long)]
        probe: bool,
        /// Lookup bearer token (overrides lookup.bearer_token)
        #[arg(long, env = "EVENTCHECK_LOOKUP_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export records for the public site or for reviewers
    Export {
        /// Submissions file (.json, .yaml or .yml)
        input: PathBuf,
        /// Who the export is for
        #[arg(long, value_enum, default_value = "public")]
        audience: Audience,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Run the identity pass before exporting
        #[arg(long)]
        reconcile: bool,
        /// Probe website reachability before exporting
        #[arg(long)]
        probe: bool,
        /// Lookup bearer token (overrides lookup.bearer_token)
        #[arg(long, env = "EVENTCHECK_LOOKUP_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version {
        /// Also show the build commit and date
        #[arg(long)]
        build_info: bool,
    },
    /// Generate shell completion script
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Audience {
    Public,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}
