//! In-memory DEP-12 document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{canonical_bib_field, normalize_bib_value, REFERENCE_FIELD};
use crate::checkers::{BibliographyChecker, UrlChecker};
use crate::validate::Validator;
use crate::value::{Record, Value};
use crate::warning::Warning;

/// A DEP-12 upstream metadata document.
///
/// Construction and mutation accept any value shape under any field name,
/// so malformed documents can be built and then diagnosed with
/// [`Validator::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed mapping as-is
    pub fn from_mapping(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a `Reference`-only document from bibliographic entries.
    ///
    /// Each entry is a sequence of `(field, text)` pairs. Field names are
    /// canonicalized and numeric values normalized; the records are always
    /// stored as a list.
    pub fn from_bibliography<I, E, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let records: Vec<Value> = entries
            .into_iter()
            .map(|entry| {
                let record: Record = entry
                    .into_iter()
                    .map(|(key, text)| {
                        let field = canonical_bib_field(key.as_ref());
                        let value = normalize_bib_value(&field, text.as_ref());
                        (field, Value::Scalar(value))
                    })
                    .collect();
                Value::Record(record)
            })
            .collect();

        let mut document = Self::new();
        document.set(REFERENCE_FIELD, Value::List(records));
        document
    }

    /// Names of the fields currently present
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Store a value, returning the previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Remove a field, returning its value
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field mapping, for serializers
    pub fn as_mapping(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn into_mapping(self) -> BTreeMap<String, Value> {
        self.fields
    }

    /// `Reference` coerced to a list of records.
    ///
    /// A bare record counts as a one-element list. Elements that are not
    /// records are left out.
    pub fn references(&self) -> Vec<&Record> {
        reference_items(self)
            .into_iter()
            .filter_map(|(_, item)| item.as_record())
            .collect()
    }

    /// Validate with the given validator
    pub fn validate<U, B>(&self, validator: &Validator<U, B>) -> Vec<Warning>
    where
        U: UrlChecker,
        B: BibliographyChecker,
    {
        validator.validate(self)
    }
}

/// `Reference` elements paired with their position in the document
pub(crate) fn reference_items(document: &Document) -> Vec<(usize, &Value)> {
    match document.get(REFERENCE_FIELD) {
        Some(Value::List(items)) => items.iter().enumerate().collect(),
        Some(record) if record.as_record().is_some() => vec![(0, record)],
        _ => Vec::new(),
    }
}

impl From<BTreeMap<String, Value>> for Document {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self::from_mapping(fields)
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self::from_mapping(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn test_get_set_delete() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.get("Repository"), None);

        assert_eq!(doc.set("Repository", "https://example.org/repo.git"), None);
        let previous = doc.set("Repository", "https://example.org/other.git");
        assert_eq!(previous, Some(Value::from("https://example.org/repo.git")));

        assert_eq!(
            doc.delete("Repository"),
            Some(Value::from("https://example.org/other.git"))
        );
        assert_eq!(doc.delete("Repository"), None);
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut doc = Document::new();
        doc.set("Screenshots", vec![Value::from("https://example.org/a.png")]);

        if let Some(Value::List(items)) = doc.get_mut("Screenshots") {
            items.push(Value::from("https://example.org/b.png"));
        }
        assert_eq!(
            doc.get("Screenshots").and_then(Value::as_list).map(<[Value]>::len),
            Some(2)
        );
        assert!(doc.get_mut("Gallery").is_none());
    }

    #[test]
    fn test_set_accepts_any_shape() {
        let mut doc = Document::new();
        doc.set("Bug-Database", vec![Value::from("a"), Value::from("b")]);
        doc.set("Not-A-Field", Record::new());
        assert_eq!(doc.len(), 2);
        assert!(doc.contains("Not-A-Field"));
    }

    #[test]
    fn test_from_mapping_round_trip() {
        let mut mapping = BTreeMap::new();
        mapping.insert("Archive".to_string(), Value::from("CRAN"));
        mapping.insert(
            "Registry".to_string(),
            Value::from(vec![Value::from(Record::new())]),
        );
        let doc = Document::from_mapping(mapping.clone());

        for (name, value) in &mapping {
            assert_eq!(doc.get(name), Some(value));
        }
        assert_eq!(doc.into_mapping(), mapping);
    }

    #[test]
    fn test_from_bibliography_canonicalizes() {
        let doc = Document::from_bibliography(vec![vec![
            ("doi", "10.1000/xyz"),
            ("year", "2020"),
            ("title", "Something"),
        ]]);

        let refs = doc.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].get("DOI"), Some(&Value::from("10.1000/xyz")));
        assert_eq!(refs[0].get("Year"), Some(&Value::Scalar(Scalar::Integer(2020))));
        assert_eq!(refs[0].get("Title"), Some(&Value::from("Something")));
    }

    #[test]
    fn test_from_bibliography_always_a_list() {
        let doc = Document::from_bibliography(vec![vec![("title", "Only")]]);
        assert!(matches!(doc.get(REFERENCE_FIELD), Some(Value::List(items)) if items.len() == 1));

        let empty = Document::from_bibliography(Vec::<Vec<(&str, &str)>>::new());
        assert_eq!(empty.get(REFERENCE_FIELD), Some(&Value::List(Vec::new())));
    }

    #[test]
    fn test_references_coercion() {
        let mut record = Record::new();
        record.insert("Title".to_string(), Value::from("Bare"));

        let mut doc = Document::new();
        assert!(doc.references().is_empty());

        doc.set(REFERENCE_FIELD, record.clone());
        assert_eq!(doc.references(), vec![&record]);

        doc.set(
            REFERENCE_FIELD,
            vec![Value::from("stray"), Value::from(record.clone())],
        );
        assert_eq!(doc.references(), vec![&record]);

        doc.set(REFERENCE_FIELD, "just text");
        assert!(doc.references().is_empty());
    }
}
