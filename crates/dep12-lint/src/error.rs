//! Error types for dep12-lint

use dep12_bibtex::BibtexError;
use dep12_core::ConstructionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop a lint run; each maps to exit status 2
#[derive(Debug, Error)]
pub enum LintError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{path}: {source}")]
    Construction {
        path: String,
        #[source]
        source: ConstructionError,
    },

    #[error("{path}: {source}")]
    Bibtex {
        path: String,
        #[source]
        source: BibtexError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LintError>;
