//! Pluggable checkers used by the validation engine
//!
//! The engine only decides which checks apply to which fields. Whether a
//! string is a URL, or whether a bibliographic record is well formed, is
//! answered by a [`UrlChecker`] and a [`BibliographyChecker`].

use std::collections::BTreeMap;

use url::Url;

use crate::value::{Record, Scalar};

/// Decides whether a string is a syntactically valid URL
pub trait UrlChecker {
    fn is_valid_url(&self, candidate: &str) -> bool;
}

impl<F> UrlChecker for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_url(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

/// A field-level problem with a bibliographic record
#[derive(Debug, Clone, PartialEq)]
pub struct BibProblem {
    /// Field name as reported by the checker
    pub field: String,
    /// Message template, may contain `%(value)s`
    pub message: String,
    pub value: Option<Scalar>,
    pub extra: BTreeMap<String, String>,
}

impl BibProblem {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Reports problems with a single bibliographic record.
///
/// Records are passed with lower-cased field names.
pub trait BibliographyChecker {
    fn check_record(&self, record: &Record) -> Vec<BibProblem>;
}

impl<F> BibliographyChecker for F
where
    F: Fn(&Record) -> Vec<BibProblem>,
{
    fn check_record(&self, record: &Record) -> Vec<BibProblem> {
        self(record)
    }
}

/// Bibliographic checker that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBibliographyChecks;

impl BibliographyChecker for NoBibliographyChecks {
    fn check_record(&self, _record: &Record) -> Vec<BibProblem> {
        Vec::new()
    }
}

/// Schemes whose URLs must name a host
const HOST_SCHEMES: [&str; 2] = ["http", "https"];

/// URL checker based on WHATWG URL parsing.
///
/// Any scheme is accepted, so `mailto:` and `git://` addresses pass. The
/// parser silently drops tabs, newlines and surrounding spaces, so any
/// whitespace or control character in the candidate is rejected up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxUrlChecker;

impl UrlChecker for SyntaxUrlChecker {
    fn is_valid_url(&self, candidate: &str) -> bool {
        if candidate.is_empty()
            || candidate
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        let Ok(url) = Url::parse(candidate) else {
            return false;
        };

        if HOST_SCHEMES.contains(&url.scheme()) {
            return url.host_str().is_some_and(|host| !host.is_empty());
        }
        true
    }
}
