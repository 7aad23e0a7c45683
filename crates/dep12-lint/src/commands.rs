//! Subcommand handlers

use std::io::Write;
use std::path::Path;

use dep12_bibtex::{document_from_bibtex_path, BibtexChecker};
use dep12_core::{Document, NoBibliographyChecks, SyntaxUrlChecker, Validator};
use tracing::{debug, info};

use crate::cli::{CheckArgs, Cli, Commands, FromBibtexArgs, OutputFormat};
use crate::config::LintConfig;
use crate::error::{LintError, Result};
use crate::report::{render_json, render_text, FileReport};

/// No warnings, or warnings without `--fatal`
pub const EXIT_CLEAN: u8 = 0;
/// Warnings remained and were fatal
pub const EXIT_FATAL: u8 = 1;
/// A file or the configuration could not be processed
pub const EXIT_ERROR: u8 = 2;

/// Dispatch a parsed command line, writing reports to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<u8> {
    match &cli.command {
        Commands::Check(args) => run_check(args, out),
        Commands::FromBibtex(args) => run_from_bibtex(args, out),
    }
}

pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> Result<u8> {
    let mut config = LintConfig::resolve(args.config.as_deref())?;
    config.lint.fatal |= args.fatal;
    config.lint.ignore.extend(args.ignore.iter().copied());

    let reports = args
        .files
        .iter()
        .map(|path| check_file(path, &config))
        .collect::<Result<Vec<_>>>()?;

    let rendered = match args.format {
        OutputFormat::Text => render_text(&reports),
        OutputFormat::Json => render_json(&reports)?,
    };
    out.write_all(rendered.as_bytes())?;

    let dirty = reports.iter().filter(|r| !r.is_clean()).count();
    info!(files = reports.len(), dirty, "check finished");

    if config.lint.fatal && dirty > 0 {
        Ok(EXIT_FATAL)
    } else {
        Ok(EXIT_CLEAN)
    }
}

/// Load and validate one metadata file, dropping ignored warning kinds
pub fn check_file(path: &Path, config: &LintConfig) -> Result<FileReport> {
    let shown = path.display().to_string();
    let document =
        Document::from_yaml_path(path, &config.load).map_err(|source| LintError::Construction {
            path: shown.clone(),
            source,
        })?;

    let mut warnings = if config.lint.check_references {
        Validator::new(SyntaxUrlChecker, BibtexChecker::new()).validate(&document)
    } else {
        Validator::new(SyntaxUrlChecker, NoBibliographyChecks).validate(&document)
    };
    let total = warnings.len();
    warnings.retain(|w| !config.lint.ignore.contains(&w.kind()));
    debug!(path = %shown, total, reported = warnings.len(), "validated file");

    Ok(FileReport {
        path: shown,
        warnings,
    })
}

pub fn run_from_bibtex<W: Write>(args: &FromBibtexArgs, out: &mut W) -> Result<u8> {
    let shown = args.file.display().to_string();
    let document = document_from_bibtex_path(&args.file).map_err(|source| LintError::Bibtex {
        path: shown.clone(),
        source,
    })?;
    let yaml = document
        .to_yaml_string()
        .map_err(|source| LintError::Construction {
            path: shown,
            source,
        })?;
    out.write_all(yaml.as_bytes())?;
    Ok(EXIT_CLEAN)
}
