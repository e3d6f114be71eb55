//! Command-line argument structures for cmdhist

use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct NewArgs {
    /// Command line that was executed
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Working directory (defaults to the current directory)
    #[arg(short = 'D', long)]
    pub dir: Option<String>,

    /// Version-control branch of the directory
    #[arg(short = 'B', long, default_value = "")]
    pub branch: String,

    /// Exit status of the command
    #[arg(short = 'S', long, default_value_t = 0, allow_negative_numbers = true)]
    pub status: i32,

    /// Timestamp in Unix format (defaults to now)
    #[arg(short = 'T', long)]
    pub timestamp: Option<i64>,
}

#[derive(Args)]
pub struct ListArgs {
    /// History file to read (stdin if not specified)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Fields to show after the id, comma separated (overrides config)
    #[arg(short = 'F', long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Keep commands starting with this prefix; repeat to narrow further
    #[arg(short = 'G', long = "grep", value_name = "PREFIX")]
    pub grep: Vec<String>,

    /// Sort by timestamp before listing
    #[arg(long)]
    pub sort: bool,

    /// Drop repeated commands
    #[arg(long, overrides_with = "no_unique")]
    pub unique: bool,

    /// Keep repeated commands
    #[arg(long, overrides_with = "unique")]
    pub no_unique: bool,

    /// Newest entries first
    #[arg(long, overrides_with = "no_reverse")]
    pub reverse: bool,

    /// Oldest entries first
    #[arg(long, overrides_with = "reverse")]
    pub no_reverse: bool,

    /// Skip malformed tokens instead of failing
    #[arg(long)]
    pub tolerant: bool,

    /// Maximum number of entries to print
    #[arg(short = 'L', long)]
    pub limit: Option<usize>,

    /// Print records as JSON instead of rendered lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Initialize configuration file with defaults
    #[arg(long)]
    pub init: bool,

    /// Validate configuration file
    #[arg(long)]
    pub validate: bool,
}

/// Resolve a `--flag` / `--no-flag` pair against a configured default
pub(crate) fn resolve_toggle(on: bool, off: bool, default: bool) -> bool {
    if off {
        false
    } else if on {
        true
    } else {
        default
    }
}
