//! # Document
//!
//! Format-independent view of a parsed YAML or JSON document.
//!
//! YAML mappings may have non-string keys (`1: Yg==`) and unquoted scalars
//! come back as numbers or booleans, while JSON objects are always
//! string-keyed. Both are lowered into [`Document`] so the decoder can
//! normalize them with a single set of pattern matches.

use crate::error::{CodecError, Result};
use std::collections::BTreeMap;

/// Loosely-typed document value
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    /// Numbers keep the textual form produced by the source parser
    Number(String),
    String(String),
    Sequence(Vec<Document>),
    /// Key/value pairs in document order; keys are not necessarily strings
    Mapping(Vec<(Document, Document)>),
}

impl Document {
    /// Name of the variant, as reported in `unexpected type: ...` errors
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "bool",
            Document::Number(_) => "number",
            Document::String(_) => "string",
            Document::Sequence(_) => "sequence",
            Document::Mapping(_) => "mapping",
        }
    }

    /// Normalize a mapping into a string-keyed map
    ///
    /// Scalar keys are stringified the same way as scalar values. Later
    /// duplicates (e.g. `1` and `"1"`) overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// `UnexpectedType` if `self` is not a mapping, or if a key is itself a
    /// mapping or sequence.
    pub fn into_string_map(self, context: &str) -> Result<BTreeMap<String, Document>> {
        let entries = match self {
            Document::Mapping(entries) => entries,
            other => return Err(CodecError::unexpected_type(context, other.type_name())),
        };

        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let key = key.into_scalar_string(&format!("a key of {context}"))?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Coerce a scalar into its string form
    ///
    /// Strings are returned as-is, numbers and booleans in their textual
    /// form and `null` as the empty string.
    ///
    /// # Errors
    ///
    /// `UnexpectedType` for mappings and sequences.
    pub fn into_scalar_string(self, context: &str) -> Result<String> {
        match self {
            Document::Null => Ok(String::new()),
            Document::Bool(b) => Ok(b.to_string()),
            Document::Number(n) | Document::String(n) => Ok(n),
            other @ (Document::Sequence(_) | Document::Mapping(_)) => {
                Err(CodecError::unexpected_type(context, other.type_name()))
            }
        }
    }
}

impl From<serde_yaml::Value> for Document {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Document::Null,
            serde_yaml::Value::Bool(b) => Document::Bool(b),
            serde_yaml::Value::Number(n) => Document::Number(n.to_string()),
            serde_yaml::Value::String(s) => Document::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Document::Sequence(seq.into_iter().map(Document::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Document::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Document::from(k), Document::from(v)))
                    .collect(),
            ),
            // Tags (`!!binary`, custom `!Foo`) carry no meaning for a Secret
            serde_yaml::Value::Tagged(tagged) => Document::from(tagged.value),
        }
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Document::Null,
            serde_json::Value::Bool(b) => Document::Bool(b),
            serde_json::Value::Number(n) => Document::Number(n.to_string()),
            serde_json::Value::String(s) => Document::String(s),
            serde_json::Value::Array(arr) => {
                Document::Sequence(arr.into_iter().map(Document::from).collect())
            }
            serde_json::Value::Object(obj) => Document::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (Document::String(k), Document::from(v)))
                    .collect(),
            ),
        }
    }
}
