//! BibTeX support for DEP-12 `Reference` fields
//!
//! This crate provides:
//! - A nom-based BibTeX reader (`@string` macros, concatenation, nested braces)
//! - Conversion of parsed entries into a `Reference` document
//! - Identifier validators (DOI, ISBN, ISSN, PMID, arXiv)
//! - [`BibtexChecker`], a field-level checker for bibliographic records

mod checker;
mod convert;
mod entry;
pub mod identifiers;
pub mod parser;

pub use checker::{BibtexChecker, KNOWN_REFERENCE_FIELDS};
pub use convert::{document_from_bibtex, document_from_bibtex_path, document_from_entries};
pub use entry::{BibEntry, BibField};
pub use parser::{parse_bibliography, BibParseError, Bibliography, BibtexError};
