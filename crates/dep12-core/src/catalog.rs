//! Field catalog: the fixed DEP-12 schema
//!
//! Membership tables for top-level fields plus the naming rules applied to
//! bibliographic record fields stored under `Reference`.

use crate::value::Scalar;

/// Name of the field holding bibliographic records
pub const REFERENCE_FIELD: &str = "Reference";

/// Every recognized top-level field name
pub const KNOWN_FIELDS: [&str; 21] = [
    "Archive",
    "ASCL-Id",
    "Bug-Database",
    "Bug-Submit",
    "Cite-As",
    "Changelog",
    "CPE",
    "Documentation",
    "Donation",
    "FAQ",
    "Funding",
    "Gallery",
    "Other-References",
    "Reference",
    "Registration",
    "Registry",
    "Repository",
    "Repository-Browse",
    "Screenshots",
    "Security-Contact",
    "Webservice",
];

/// Fields allowed to hold list values
pub const LIST_FIELDS: [&str; 4] = ["Funding", "Reference", "Registry", "Screenshots"];

/// Fields expected to contain one or more URLs.
///
/// Declaration order is significant: URL warnings are reported in this order.
pub const URL_FIELDS: [&str; 13] = [
    "Bug-Database",
    "Bug-Submit",
    "Changelog",
    "Documentation",
    "Donation",
    "FAQ",
    "Gallery",
    "Other-References",
    "Registration",
    "Repository",
    "Repository-Browse",
    "Screenshots",
    "Webservice",
];

/// Bibliographic field names spelled fully upper-case
pub const UPPERCASE_BIB_FIELDS: [&str; 5] = ["doi", "isbn", "issn", "pmid", "url"];

/// Bibliographic fields whose digit-only values are stored as integers
pub const NUMERIC_BIB_FIELDS: [&str; 4] = ["Number", "Pages", "Volume", "Year"];

pub fn is_known_field(name: &str) -> bool {
    KNOWN_FIELDS.contains(&name)
}

pub fn is_list_field(name: &str) -> bool {
    LIST_FIELDS.contains(&name)
}

pub fn is_url_field(name: &str) -> bool {
    URL_FIELDS.contains(&name)
}

/// Canonical spelling of a bibliographic field name.
///
/// `doi`, `isbn`, `issn`, `pmid` and `url` become upper-case in any input
/// case. Any other name gets its first character upper-cased and keeps the
/// rest as given, so `booktitle` becomes `Booktitle` and `BookTitle` stays.
pub fn canonical_bib_field(name: &str) -> String {
    let lower = name.to_lowercase();
    if UPPERCASE_BIB_FIELDS.contains(&lower.as_str()) {
        return lower.to_uppercase();
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize a bibliographic value for a canonical field name.
///
/// `Number`, `Pages`, `Volume` and `Year` values made of decimal digits
/// without a leading zero become integers; everything else stays text.
pub fn normalize_bib_value(canonical_field: &str, text: &str) -> Scalar {
    if NUMERIC_BIB_FIELDS.contains(&canonical_field) && is_plain_integer(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Scalar::Integer(n);
        }
    }
    Scalar::String(text.to_string())
}

fn is_plain_integer(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'1'..=b'9') => bytes.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
