//! YAML loading and dumping
//!
//! Parser behaviour is controlled by an explicit [`LoadOptions`] value
//! passed to every load call; there is no process-wide parser setting.

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::document::Document;
use crate::error::{ConstructionError, Result};
use crate::value::{Record, Scalar, Value};

/// Limits and policies applied while loading a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Largest accepted input, in bytes
    pub max_document_bytes: usize,
    /// Deepest accepted nesting; the top-level mapping is depth 1
    pub max_depth: usize,
    /// Accept tagged nodes (`!tag value`), keeping only the inner value
    pub allow_tags: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_document_bytes: 1024 * 1024,
            max_depth: 32,
            allow_tags: false,
        }
    }
}

impl Document {
    /// Parse a YAML document
    pub fn from_yaml_str(text: &str, options: &LoadOptions) -> Result<Self> {
        if text.len() > options.max_document_bytes {
            return Err(ConstructionError::TooLarge(options.max_document_bytes));
        }
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let root: YamlValue = serde_yaml::from_str(text)?;
        let root = strip_tag(root, options)?;
        let fields = match root {
            YamlValue::Null => BTreeMap::new(),
            YamlValue::Mapping(mapping) => convert_mapping(mapping, options, 1)?,
            other => {
                return Err(ConstructionError::UnsupportedSource(
                    describe(&other).to_string(),
                ))
            }
        };

        debug!(fields = fields.len(), "loaded YAML document");
        Ok(Self::from_mapping(fields))
    }

    /// Parse a YAML document from a reader, honouring the size limit
    pub fn from_yaml_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let limit = options.max_document_bytes;
        let mut text = String::new();
        reader
            .take(limit as u64 + 1)
            .read_to_string(&mut text)?;
        if text.len() > limit {
            return Err(ConstructionError::TooLarge(limit));
        }
        Self::from_yaml_str(&text, options)
    }

    /// Load a YAML document from a file
    pub fn from_yaml_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading metadata file");
        Self::from_yaml_reader(File::open(path)?, options)
    }

    /// Serialize the field mapping as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self.as_mapping())?)
    }
}

fn convert_mapping(
    mapping: serde_yaml::Mapping,
    options: &LoadOptions,
    depth: usize,
) -> Result<BTreeMap<String, Value>> {
    if depth > options.max_depth {
        return Err(ConstructionError::TooDeep(options.max_depth));
    }

    let mut fields = BTreeMap::new();
    for (key, value) in mapping {
        let key = convert_key(strip_tag(key, options)?)?;
        fields.insert(key, convert_value(value, options, depth + 1)?);
    }
    Ok(fields)
}

fn convert_value(value: YamlValue, options: &LoadOptions, depth: usize) -> Result<Value> {
    match strip_tag(value, options)? {
        YamlValue::Sequence(items) => {
            if depth > options.max_depth {
                return Err(ConstructionError::TooDeep(options.max_depth));
            }
            let items = items
                .into_iter()
                .map(|item| convert_value(item, options, depth + 1))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(items))
        }
        YamlValue::Mapping(mapping) => {
            let record: Record = convert_mapping(mapping, options, depth)?;
            Ok(Value::Record(record))
        }
        scalar => Ok(Value::Scalar(convert_scalar(scalar))),
    }
}

fn convert_scalar(value: YamlValue) -> Scalar {
    match value {
        YamlValue::Bool(b) => Scalar::Bool(b),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        YamlValue::String(s) => Scalar::String(s),
        _ => Scalar::Null,
    }
}

fn convert_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        other => Err(ConstructionError::UnsupportedKey(describe(&other).to_string())),
    }
}

/// Drop tags when allowed, reject them otherwise
fn strip_tag(value: YamlValue, options: &LoadOptions) -> Result<YamlValue> {
    match value {
        YamlValue::Tagged(tagged) => {
            if !options.allow_tags {
                return Err(ConstructionError::TaggedValue(tagged.tag.to_string()));
            }
            strip_tag(tagged.value, options)
        }
        other => Ok(other),
    }
}

fn describe(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}
