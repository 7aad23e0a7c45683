//! Error types for dep12-core
//!
//! Only document construction can fail. Validation findings are
//! [`Warning`](crate::Warning) values, never errors.

use thiserror::Error;

/// Result type alias for document construction
pub type Result<T> = std::result::Result<T, ConstructionError>;

/// Fatal error while building a document from a source
#[derive(Error, Debug)]
pub enum ConstructionError {
    /// The top-level node is not a mapping
    #[error("Unsupported document source: expected a mapping, found {0}")]
    UnsupportedSource(String),

    /// A mapping key cannot be used as a field name
    #[error("Unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// A tagged node was found while tags are disallowed
    #[error("Tagged value {0} is not allowed")]
    TaggedValue(String),

    /// Input exceeds the configured size limit
    #[error("Document exceeds size limit of {0} bytes")]
    TooLarge(usize),

    /// Input nesting exceeds the configured depth limit
    #[error("Document nesting exceeds depth limit of {0}")]
    TooDeep(usize),

    /// Underlying YAML syntax or serialization failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
