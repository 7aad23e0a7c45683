//! dep12-lint: command-line checks for DEP-12 upstream metadata
//!
//! - `check` loads metadata files, validates them and prints text or JSON reports
//! - `from-bibtex` converts a `.bib` file into a `Reference` document

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use cli::{Cli, Commands, OutputFormat, DEFAULT_METADATA_PATH};
pub use commands::{run, EXIT_CLEAN, EXIT_ERROR, EXIT_FATAL};
pub use config::{ConfigError, LintConfig, LintSettings};
pub use error::{LintError, Result};
pub use report::FileReport;
