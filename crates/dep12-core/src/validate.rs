//! Validation engine
//!
//! Three independent passes, reported in this order:
//! 1. field shape, over field names sorted lexicographically
//! 2. URL fields, in [`URL_FIELDS`] declaration order
//! 3. bibliographic records under `Reference`, in document order

use tracing::{debug, trace};

use crate::catalog::{canonical_bib_field, is_known_field, is_list_field, URL_FIELDS};
use crate::checkers::{BibliographyChecker, NoBibliographyChecks, SyntaxUrlChecker, UrlChecker};
use crate::document::{reference_items, Document};
use crate::value::{Record, Scalar, Value};
use crate::warning::Warning;

/// Validation engine with its URL and bibliographic checkers
#[derive(Debug, Clone)]
pub struct Validator<U = SyntaxUrlChecker, B = NoBibliographyChecks> {
    url_checker: U,
    bib_checker: B,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(SyntaxUrlChecker, NoBibliographyChecks)
    }
}

impl<U, B> Validator<U, B>
where
    U: UrlChecker,
    B: BibliographyChecker,
{
    pub fn new(url_checker: U, bib_checker: B) -> Self {
        Self {
            url_checker,
            bib_checker,
        }
    }

    /// Validate a document and return every warning found
    pub fn validate(&self, document: &Document) -> Vec<Warning> {
        let mut warnings = check_field_shapes(document);
        debug!(count = warnings.len(), "field shape pass done");

        let url_warnings = self.check_url_fields(document);
        debug!(count = url_warnings.len(), "URL pass done");
        warnings.extend(url_warnings);

        let bib_warnings = self.check_references(document);
        debug!(count = bib_warnings.len(), "bibliography pass done");
        warnings.extend(bib_warnings);

        for warning in &warnings {
            trace!(kind = %warning.kind(), field = warning.field(), "{}", warning.render());
        }
        warnings
    }

    fn check_url_fields(&self, document: &Document) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for field in URL_FIELDS {
            let Some(value) = document.get(field) else {
                continue;
            };
            for item in value.as_items() {
                match item {
                    Value::Scalar(scalar) => {
                        if let Some(warning) = self.check_url(field, scalar) {
                            warnings.push(warning);
                        }
                    }
                    _ => warnings.push(Warning::non_scalar_value(field)),
                }
            }
        }

        warnings
    }

    fn check_url(&self, field: &str, scalar: &Scalar) -> Option<Warning> {
        let text = scalar.to_string();
        if self.url_checker.is_valid_url(&text) {
            return None;
        }

        if let Some(stripped) = text.strip_suffix('\n') {
            if self.url_checker.is_valid_url(stripped) {
                return Some(Warning::url_trailing_newline(field, scalar, stripped));
            }
        }

        Some(Warning::invalid_url(field, scalar))
    }

    fn check_references(&self, document: &Document) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for (key, item) in reference_items(document) {
            let Some(record) = item.as_record() else {
                trace!(key, "skipping non-record reference element");
                continue;
            };
            for problem in self.bib_checker.check_record(&lowercase_keys(record)) {
                let field = canonical_bib_field(&problem.field);
                warnings.push(Warning::bibliography(problem, field, key));
            }
        }

        warnings
    }
}

/// Validate a document with explicit checkers
pub fn validate<U, B>(document: &Document, url_checker: U, bib_checker: B) -> Vec<Warning>
where
    U: UrlChecker,
    B: BibliographyChecker,
{
    Validator::new(url_checker, bib_checker).validate(document)
}

fn check_field_shapes(document: &Document) -> Vec<Warning> {
    let mut names: Vec<&str> = document.fields().collect();
    names.sort_unstable();

    let mut warnings = Vec::new();
    for name in names {
        if !is_known_field(name) {
            warnings.push(Warning::unknown_field(name));
        }
        let is_scalar = document.get(name).is_some_and(Value::is_scalar);
        if !is_scalar && !is_list_field(name) {
            warnings.push(Warning::scalar_value_expected(name));
        }
    }
    warnings
}

fn lowercase_keys(record: &Record) -> Record {
    record
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value.clone()))
        .collect()
}
