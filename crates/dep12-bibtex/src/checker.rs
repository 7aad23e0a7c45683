//! Field-level checks for bibliographic records
//!
//! Only the well-formedness of individual fields is checked. Whether a
//! record holds enough fields to be a complete citation is out of scope.

use dep12_core::{BibProblem, BibliographyChecker, Record, Scalar, SyntaxUrlChecker, UrlChecker, Value};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::identifiers::{is_valid_arxiv_id, is_valid_doi, is_valid_isbn, is_valid_issn, is_valid_pmid};

/// Lower-cased field names accepted inside a `Reference` record
pub const KNOWN_REFERENCE_FIELDS: [&str; 35] = [
    "abstract",
    "address",
    "archiveprefix",
    "author",
    "booktitle",
    "chapter",
    "comment",
    "debian-package",
    "doi",
    "edition",
    "editor",
    "eprint",
    "howpublished",
    "institution",
    "isbn",
    "issn",
    "journal",
    "key",
    "keywords",
    "language",
    "month",
    "note",
    "number",
    "organization",
    "pages",
    "pmid",
    "primaryclass",
    "publisher",
    "school",
    "series",
    "title",
    "type",
    "url",
    "volume",
    "year",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    static ref YEAR_PATTERN: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref PAGES_PATTERN: Regex =
        Regex::new(r"^([A-Za-z]*\d+)(?:\s*(?:-{1,2}|–)\s*([A-Za-z]*\d+))?\+?$").unwrap();
}

/// Default [`BibliographyChecker`]: identifiers, URLs, dates and page ranges
#[derive(Debug, Clone, Default)]
pub struct BibtexChecker<U = SyntaxUrlChecker> {
    url_checker: U,
}

impl BibtexChecker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U: UrlChecker> BibtexChecker<U> {
    /// Use a specific URL checker for `url` fields
    pub fn with_url_checker(url_checker: U) -> Self {
        Self { url_checker }
    }

    fn check_field(&self, field: &str, scalar: &Scalar, record: &Record) -> Option<&'static str> {
        let text = scalar.to_string();
        let text = text.trim();
        if text.is_empty() {
            return Some("empty value");
        }

        match field {
            "doi" if !is_valid_doi(text) => Some("invalid DOI '%(value)s'"),
            "isbn" if !text.split(',').all(|isbn| is_valid_isbn(isbn.trim())) => {
                Some("invalid ISBN '%(value)s'")
            }
            "issn" if !text.split(',').all(|issn| is_valid_issn(issn.trim())) => {
                Some("invalid ISSN '%(value)s'")
            }
            "pmid" if !is_valid_pmid(text) => Some("invalid PubMed ID '%(value)s'"),
            "url" if !self.url_checker.is_valid_url(text) => {
                Some("value '%(value)s' does not look like valid URL")
            }
            "eprint" if is_arxiv_record(record) && !is_valid_arxiv_id(text) => {
                Some("invalid arXiv identifier '%(value)s'")
            }
            "year" if !YEAR_PATTERN.is_match(text) => {
                Some("year '%(value)s' is not a four-digit number")
            }
            "month" if !is_month(text) => Some("unrecognized month '%(value)s'"),
            "pages" => check_pages(text),
            "volume" | "number" if text.contains('\n') => Some("value contains a line break"),
            _ => None,
        }
    }
}

impl<U: UrlChecker> BibliographyChecker for BibtexChecker<U> {
    fn check_record(&self, record: &Record) -> Vec<BibProblem> {
        let mut problems = Vec::new();

        for (field, value) in record {
            if !KNOWN_REFERENCE_FIELDS.contains(&field.as_str()) {
                problems.push(BibProblem::new(field.as_str(), "unknown reference field"));
            }

            let Value::Scalar(scalar) = value else {
                problems.push(BibProblem::new(field.as_str(), "non-scalar value"));
                continue;
            };

            if let Some(message) = self.check_field(field, scalar, record) {
                problems.push(BibProblem::new(field.as_str(), message).with_value(scalar.clone()));
            }
        }

        debug!(problems = problems.len(), "checked bibliographic record");
        problems
    }
}

fn is_arxiv_record(record: &Record) -> bool {
    record
        .get("archiveprefix")
        .and_then(Value::as_str)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("arxiv"))
}

fn is_month(text: &str) -> bool {
    if let Ok(n) = text.parse::<u8>() {
        return (1..=12).contains(&n);
    }
    let lower = text.to_lowercase();
    let lower = lower.trim_end_matches('.');
    MONTH_NAMES
        .iter()
        .any(|name| *name == lower || (lower.len() == 3 && name.starts_with(lower)))
}

fn check_pages(text: &str) -> Option<&'static str> {
    let Some(caps) = PAGES_PATTERN.captures(text) else {
        return Some("pages '%(value)s' is not a page or page range");
    };
    let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) else {
        return None;
    };
    match (start.as_str().parse::<u64>(), end.as_str().parse::<u64>()) {
        (Ok(start), Ok(end)) if end < start => Some("page range '%(value)s' ends before it starts"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(fields: &[(&str, Value)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn problem_fields(record: &Record) -> Vec<String> {
        BibtexChecker::new()
            .check_record(record)
            .into_iter()
            .map(|p| p.field)
            .collect()
    }

    #[test]
    fn test_well_formed_record() {
        let rec = record(&[
            ("author", Value::from("Jane Doe")),
            ("title", Value::from("A Paper")),
            ("doi", Value::from("10.1000/xyz")),
            ("year", Value::from(2020i64)),
            ("month", Value::from("Oct")),
            ("pages", Value::from("891--921")),
            ("volume", Value::from(17i64)),
            ("issn", Value::from("0317-8471")),
            ("url", Value::from("https://example.org/paper")),
        ]);
        assert!(BibtexChecker::new().check_record(&rec).is_empty());
    }

    #[rstest]
    #[case("doi", Value::from("bogus"))]
    #[case("isbn", Value::from("0-306-40615-1"))]
    #[case("issn", Value::from("0317-8472"))]
    #[case("pmid", Value::from("PMC1"))]
    #[case("url", Value::from("not a url"))]
    #[case("year", Value::from("twenty"))]
    #[case("year", Value::from(20i64))]
    #[case("month", Value::from("Smarch"))]
    #[case("month", Value::from(13i64))]
    #[case("pages", Value::from("ten"))]
    #[case("pages", Value::from("20--10"))]
    #[case("title", Value::from("  "))]
    fn test_malformed_field(#[case] field: &str, #[case] value: Value) {
        let rec = record(&[(field, value)]);
        assert_eq!(problem_fields(&rec), vec![field.to_string()]);
    }

    #[test]
    fn test_problem_carries_value() {
        let rec = record(&[("doi", Value::from("bogus"))]);
        let problems = BibtexChecker::new().check_record(&rec);
        assert_eq!(problems[0].message, "invalid DOI '%(value)s'");
        assert_eq!(problems[0].value, Some(Scalar::from("bogus")));
    }

    #[test]
    fn test_unknown_and_non_scalar_fields() {
        let rec = record(&[
            ("homepage", Value::from("x")),
            ("author", Value::from(vec![Value::from("a"), Value::from("b")])),
        ]);
        let problems = BibtexChecker::new().check_record(&rec);
        let messages: Vec<(&str, &str)> = problems
            .iter()
            .map(|p| (p.field.as_str(), p.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("author", "non-scalar value"),
                ("homepage", "unknown reference field"),
            ]
        );
    }

    #[test]
    fn test_eprint_checked_only_for_arxiv() {
        let rec = record(&[
            ("eprint", Value::from("not-an-id")),
            ("archiveprefix", Value::from("arXiv")),
        ]);
        assert_eq!(problem_fields(&rec), vec!["eprint".to_string()]);

        let rec = record(&[("eprint", Value::from("not-an-id"))]);
        assert!(problem_fields(&rec).is_empty());
    }

    #[test]
    fn test_injected_url_checker() {
        let checker = BibtexChecker::with_url_checker(|_: &str| true);
        let rec = record(&[("url", Value::from("anything goes"))]);
        assert!(checker.check_record(&rec).is_empty());
    }
}
