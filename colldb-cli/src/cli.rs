use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// File written by `--merge` when no `--output` is given.
pub const DEFAULT_MERGE_OUTPUT: &str = "merged_collection.db";

/// List and merge collection database files.
#[derive(Debug, Parser)]
#[command(name = "colldb", version, about)]
pub struct Args {
    /// Path to your collection.db file
    #[arg(short, long, env = "COLLDB_FILE")]
    pub file: PathBuf,

    /// Print every collection and its fingerprints
    #[arg(short, long)]
    pub list: bool,

    /// Second collection file to append after the first
    #[arg(short, long, value_name = "FILE")]
    pub merge: Option<PathBuf>,

    /// Where the merged collection is written
    #[arg(short, long, env = "COLLDB_OUTPUT", default_value = DEFAULT_MERGE_OUTPUT)]
    pub output: PathBuf,

    /// Listing format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,

    /// Log progress to stderr (honours RUST_LOG)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// How `--list` renders a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Indented plain text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Everything `run` needs, detached from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub list: bool,
    pub merge: Option<PathBuf>,
    pub output: PathBuf,
    pub format: ListFormat,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            input: args.file,
            list: args.list,
            merge: args.merge,
            output: args.output,
            format: args.format,
        }
    }
}
