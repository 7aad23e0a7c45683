//! DEP-12 upstream metadata model and validation
//!
//! This crate provides the in-memory model of a `debian/upstream/metadata`
//! document and the engine that diagnoses it:
//! - Catalog: recognized field names, list fields and URL fields
//! - Value/Document: permissive field storage that never rejects a shape
//! - Warning: structured, templated diagnostics with a stable export shape
//! - Checkers: pluggable URL and bibliographic record checkers
//! - Validator: the three-pass validation engine
//! - YAML: loading and dumping with explicit [`LoadOptions`]

pub mod catalog;
pub mod checkers;
pub mod document;
pub mod error;
pub mod validate;
pub mod value;
pub mod warning;
pub mod yaml;

pub use catalog::{
    canonical_bib_field, is_known_field, is_list_field, is_url_field, normalize_bib_value,
    KNOWN_FIELDS, LIST_FIELDS, NUMERIC_BIB_FIELDS, REFERENCE_FIELD, UPPERCASE_BIB_FIELDS,
    URL_FIELDS,
};
pub use checkers::{BibProblem, BibliographyChecker, NoBibliographyChecks, SyntaxUrlChecker, UrlChecker};
pub use document::Document;
pub use error::{ConstructionError, Result};
pub use validate::{validate, Validator};
pub use value::{Record, Scalar, Value};
pub use warning::{Warning, WarningKind};
pub use yaml::LoadOptions;
