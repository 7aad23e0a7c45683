//! BibTeX to DEP-12 conversion

use std::path::Path;

use dep12_core::Document;
use tracing::debug;

use crate::entry::BibEntry;
use crate::parser::{parse_bibliography, BibtexError};

/// Build a `Reference` document from parsed entries.
///
/// Entry types and cite keys have no DEP-12 counterpart and are dropped.
pub fn document_from_entries(entries: &[BibEntry]) -> Document {
    for entry in entries {
        debug!(
            cite_key = %entry.cite_key,
            entry_type = %entry.entry_type,
            fields = entry.fields.len(),
            "converting BibTeX entry"
        );
    }
    Document::from_bibliography(entries.iter().map(BibEntry::field_pairs))
}

/// Parse BibTeX text into a `Reference` document.
///
/// Fails on the first malformed block rather than returning a partial
/// document.
pub fn document_from_bibtex(text: &str) -> Result<Document, BibtexError> {
    let bibliography = parse_bibliography(text);

    if let Some(error) = bibliography.errors.first() {
        return Err(BibtexError::InvalidSyntax {
            line: error.line,
            message: error.message.clone(),
        });
    }
    if bibliography.entries.is_empty() {
        return Err(BibtexError::NoEntries);
    }

    debug!(entries = bibliography.entries.len(), "converted BibTeX entries");
    Ok(document_from_entries(&bibliography.entries))
}

/// Read a `.bib` file into a `Reference` document
pub fn document_from_bibtex_path(path: impl AsRef<Path>) -> Result<Document, BibtexError> {
    let text = std::fs::read_to_string(path)?;
    document_from_bibtex(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dep12_core::Value;

    #[test]
    fn test_conversion_canonicalizes_fields() {
        let doc = document_from_bibtex(
            "@article{Doe2020, author = {Jane Doe}, doi = {10.1000/xyz}, year = 2020, pages = {1--10}}",
        )
        .unwrap();

        let refs = doc.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].get("Author"), Some(&Value::from("Jane Doe")));
        assert_eq!(refs[0].get("DOI"), Some(&Value::from("10.1000/xyz")));
        assert_eq!(refs[0].get("Year").and_then(Value::as_integer), Some(2020));
        assert_eq!(refs[0].get("Pages"), Some(&Value::from("1--10")));
        assert!(refs[0].get("Doe2020").is_none());
    }

    #[test]
    fn test_upper_case_bibtex_keys_convert_like_lower_case() {
        let doc = document_from_bibtex("@ARTICLE{k, YEAR = 2020, BookTitle = {Proc}, DOI = {10.1000/xyz}}")
            .unwrap();

        let refs = doc.references();
        assert_eq!(refs[0].get("Year").and_then(Value::as_integer), Some(2020));
        assert_eq!(refs[0].get("Booktitle"), Some(&Value::from("Proc")));
        assert_eq!(refs[0].get("DOI"), Some(&Value::from("10.1000/xyz")));
    }

    #[test]
    fn test_entry_field_case_kept_after_first_letter() {
        let mut entry = BibEntry::new("k", "inproceedings");
        entry.add_field("bookTitle", "Proc");
        let doc = document_from_entries(&[entry]);
        assert_eq!(doc.references()[0].get("BookTitle"), Some(&Value::from("Proc")));
    }

    #[test]
    fn test_syntax_error_aborts() {
        let err = document_from_bibtex("@article{ok, title={A}}\n@book{bad, title={\n").unwrap_err();
        assert!(matches!(err, BibtexError::InvalidSyntax { line: 2, .. }));
    }

    #[test]
    fn test_no_entries() {
        let err = document_from_bibtex("just a comment\n").unwrap_err();
        assert!(matches!(err, BibtexError::NoEntries));
    }
}
