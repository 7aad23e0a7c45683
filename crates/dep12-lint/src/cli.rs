//! CLI argument definitions for dep12-lint.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use dep12_core::WarningKind;
use std::path::PathBuf;

/// Location of the metadata file inside a Debian source package
pub const DEFAULT_METADATA_PATH: &str = "debian/upstream/metadata";

/// Check DEP-12 upstream metadata files
#[derive(Parser, Debug)]
#[command(name = "dep12-lint", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate metadata files and report warnings
    Check(CheckArgs),

    /// Convert a BibTeX file into a DEP-12 `Reference` document
    FromBibtex(FromBibtexArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Metadata files to check
    #[arg(value_name = "FILE", default_value = DEFAULT_METADATA_PATH)]
    pub files: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 when any warning remains after filtering
    #[arg(long)]
    pub fatal: bool,

    /// Path to a lint.toml configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Drop warnings of this kind (can be specified multiple times)
    #[arg(long = "ignore", value_name = "KIND", value_parser = parse_warning_kind)]
    pub ignore: Vec<WarningKind>,
}

#[derive(Args, Debug)]
pub struct FromBibtexArgs {
    /// BibTeX file to convert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_warning_kind(s: &str) -> Result<WarningKind, String> {
    WarningKind::from_str(s).ok_or_else(|| format!("unknown warning kind '{}'", s))
}
