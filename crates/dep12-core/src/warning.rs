//! Validation warnings
//!
//! A [`Warning`] keeps its message as a template. [`Warning::render`]
//! substitutes the offending value wherever `%(value)s` appears.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::checkers::BibProblem;
use crate::value::Scalar;

/// Placeholder replaced by the offending value when rendering
pub const VALUE_PLACEHOLDER: &str = "%(value)s";

/// Category of a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Field is not part of the catalog
    UnknownField,
    /// Non-list field holds a list or record
    ScalarValueExpected,
    /// URL field element is a list or record
    NonScalarValue,
    /// URL only valid once its trailing newline is removed
    UrlTrailingNewline,
    /// URL field element is not a URL
    InvalidUrl,
    /// Problem reported by the bibliographic checker
    Bibliography,
}

impl WarningKind {
    /// Message template for engine-generated kinds
    pub fn template(&self) -> Option<&'static str> {
        match self {
            Self::UnknownField => Some("unknown field"),
            Self::ScalarValueExpected => Some("scalar value expected"),
            Self::NonScalarValue => Some("non-scalar value"),
            Self::UrlTrailingNewline => Some("URL has trailing newline character"),
            Self::InvalidUrl => Some("value '%(value)s' does not look like valid URL"),
            Self::Bibliography => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownField => "unknown_field",
            Self::ScalarValueExpected => "scalar_value_expected",
            Self::NonScalarValue => "non_scalar_value",
            Self::UrlTrailingNewline => "url_trailing_newline",
            Self::InvalidUrl => "invalid_url",
            Self::Bibliography => "bibliography",
        }
    }

    /// Parse a kind from its snake_case name
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unknown_field" => Some(Self::UnknownField),
            "scalar_value_expected" => Some(Self::ScalarValueExpected),
            "non_scalar_value" => Some(Self::NonScalarValue),
            "url_trailing_newline" => Some(Self::UrlTrailingNewline),
            "invalid_url" => Some(Self::InvalidUrl),
            "bibliography" => Some(Self::Bibliography),
            _ => None,
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A defect found by validation
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    kind: WarningKind,
    message: String,
    field: String,
    value: Option<Scalar>,
    key: Option<usize>,
    suggestion: Option<String>,
    extra: BTreeMap<String, String>,
}

impl Warning {
    fn engine(kind: WarningKind, field: &str) -> Self {
        Self {
            kind,
            message: kind.template().unwrap_or_default().to_string(),
            field: field.to_string(),
            value: None,
            key: None,
            suggestion: None,
            extra: BTreeMap::new(),
        }
    }

    pub(crate) fn unknown_field(field: &str) -> Self {
        Self::engine(WarningKind::UnknownField, field)
    }

    pub(crate) fn scalar_value_expected(field: &str) -> Self {
        Self::engine(WarningKind::ScalarValueExpected, field)
    }

    pub(crate) fn non_scalar_value(field: &str) -> Self {
        Self::engine(WarningKind::NonScalarValue, field)
    }

    pub(crate) fn url_trailing_newline(field: &str, value: &Scalar, suggestion: &str) -> Self {
        Self {
            value: Some(value.clone()),
            suggestion: Some(suggestion.to_string()),
            ..Self::engine(WarningKind::UrlTrailingNewline, field)
        }
    }

    pub(crate) fn invalid_url(field: &str, value: &Scalar) -> Self {
        Self {
            value: Some(value.clone()),
            ..Self::engine(WarningKind::InvalidUrl, field)
        }
    }

    /// Wrap a bibliographic checker problem for the record at `key`
    pub(crate) fn bibliography(problem: BibProblem, field: String, key: usize) -> Self {
        Self {
            kind: WarningKind::Bibliography,
            message: problem.message,
            field,
            value: problem.value,
            key: Some(key),
            suggestion: None,
            extra: problem.extra,
        }
    }

    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    /// The unrendered message template
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// Index of the `Reference` record a bibliographic warning is about
    pub fn key(&self) -> Option<usize> {
        self.key
    }

    /// Replacement value, for recoverable URL problems
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Message with the value substituted
    pub fn render(&self) -> String {
        let value = self
            .value
            .as_ref()
            .map(Scalar::to_string)
            .unwrap_or_default();
        self.message.replace(VALUE_PLACEHOLDER, &value)
    }

    /// Export shape as a JSON value
    pub fn export(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.render())?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean {:?}?)", suggestion)?;
        }
        if let Some(key) = self.key {
            write!(f, " [reference #{}]", key)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct WarningExport<'a> {
    kind: WarningKind,
    message: String,
    field: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, String>,
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WarningExport {
            kind: self.kind,
            message: self.render(),
            field: &self.field,
            value: self.value.as_ref(),
            key: self.key,
            suggestion: self.suggestion.as_deref(),
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_value() {
        let warning = Warning::invalid_url("Bug-Database", &Scalar::from("not a url"));
        assert_eq!(warning.message(), "value '%(value)s' does not look like valid URL");
        assert_eq!(
            warning.render(),
            "value 'not a url' does not look like valid URL"
        );
    }

    #[test]
    fn test_render_without_value() {
        let warning = Warning::unknown_field("Homepage");
        assert_eq!(warning.render(), "unknown field");
        assert_eq!(warning.to_string(), "Homepage: unknown field");
    }

    #[test]
    fn test_render_absent_value_is_empty() {
        let problem = BibProblem::new("title", "bad value '%(value)s'");
        let warning = Warning::bibliography(problem, "Title".to_string(), 0);
        assert_eq!(warning.render(), "bad value ''");
    }

    #[test]
    fn test_display_suggestion_and_key() {
        let value = Scalar::from("https://example.org/issues\n");
        let warning = Warning::url_trailing_newline("Bug-Database", &value, "https://example.org/issues");
        assert_eq!(
            warning.to_string(),
            "Bug-Database: URL has trailing newline character (did you mean \"https://example.org/issues\"?)"
        );

        let problem = BibProblem::new("doi", "invalid DOI").with_value("x");
        let warning = Warning::bibliography(problem, "DOI".to_string(), 1);
        assert_eq!(warning.to_string(), "DOI: invalid DOI [reference #1]");
    }

    #[test]
    fn test_export_shape() {
        let warning = Warning::unknown_field("Homepage");
        assert_eq!(
            warning.export(),
            serde_json::json!({
                "kind": "unknown_field",
                "message": "unknown field",
                "field": "Homepage",
            })
        );

        let problem = BibProblem::new("year", "year '%(value)s' is not a four-digit number")
            .with_value("20")
            .with_extra("hint", "use YYYY");
        let warning = Warning::bibliography(problem, "Year".to_string(), 2);
        assert_eq!(
            warning.export(),
            serde_json::json!({
                "kind": "bibliography",
                "message": "year '20' is not a four-digit number",
                "field": "Year",
                "value": "20",
                "key": 2,
                "hint": "use YYYY",
            })
        );
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            WarningKind::UnknownField,
            WarningKind::ScalarValueExpected,
            WarningKind::NonScalarValue,
            WarningKind::UrlTrailingNewline,
            WarningKind::InvalidUrl,
            WarningKind::Bibliography,
        ] {
            assert_eq!(WarningKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(WarningKind::from_str("nope"), None);
    }
}
