//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "yearshelf")]
#[command(about = "Copy a music collection into year-named folders using embedded tags")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy audio files from SOURCE into DESTINATION/<year>/
    Organize(OrganizeArgs),

    /// Count the audio files an organize run would process
    Scan {
        /// Folder to scan
        source: PathBuf,
    },

    /// Show format, size, tags and the resolved year of files
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write a year into a file's tags
    SetYear { file: PathBuf, year: i32 },

    /// Print the effective settings as TOML
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct OrganizeArgs {
    /// Folder to read audio files from
    pub source: PathBuf,

    /// Folder receiving the year folders (created if missing)
    pub destination: PathBuf,

    /// Replace files that already exist at the destination
    #[arg(short, long)]
    pub overwrite: bool,

    /// Copy files without a year into "Unknown Year"
    #[arg(short = 'u', long = "unknown-year")]
    pub unknown_year: bool,

    /// Print one line per file and every error message
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the summary and per-year histogram
    #[arg(short, long)]
    pub stats: bool,

    /// Worker threads (1 = sequential, 0 = one per CPU)
    #[arg(short, long, value_name = "N", env = "YEARSHELF_WORKERS")]
    pub workers: Option<usize>,

    /// Replace existing copies when the source is newer
    #[arg(long)]
    pub update_newer: bool,

    /// Write a JSON report (default: DESTINATION/reports/organize_report_<time>.json)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub report: Option<Option<PathBuf>>,
}
