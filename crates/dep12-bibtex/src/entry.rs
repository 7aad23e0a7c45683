//! Parsed BibTeX entries

/// A `key = value` pair inside an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibField {
    pub key: String,
    pub value: String,
}

/// A parsed BibTeX entry, fields kept in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    pub cite_key: String,
    /// Lower-cased entry type (`article`, `techreport`, ...)
    pub entry_type: String,
    pub fields: Vec<BibField>,
}

impl BibEntry {
    pub fn new(cite_key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Look up a field by name, ignoring case
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }

    /// `(field, value)` pairs, as consumed by `Document::from_bibliography`
    pub fn field_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
    }
}
