//! GIS-side domain types
//!
//! Feature attributes arrive as loosely-typed JSON. `FieldValue` keeps the
//! value kind explicit instead of coercing everything through strings, and
//! the two constructors encode the two normalization rules the wire layer
//! has to honor: the plain feature-query path collapses all numbers to
//! floating point, while the related-record path preserves integers
//! losslessly because those attributes are later reused in edit payloads.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One attribute value of a feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Normalize a JSON value the way the feature-query path does: numbers
    /// become `f64`, every other scalar its string form. Returns `None`
    /// for JSON `null` (the field is omitted from the row).
    pub fn from_query_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            other => Some(Self::Text(other.to_string())),
        }
    }

    /// Normalize a JSON value the way the related-record path does:
    /// integers stay integers when they round-trip losslessly, booleans
    /// stay booleans. Returns `None` for JSON `null`.
    pub fn from_related_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Number),
            },
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            other => Some(Self::Text(other.to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Attribute map of one feature, keyed by field name
pub type FeatureRow = HashMap<String, FieldValue>;

/// Internal field name to human-readable alias, per layer
pub type FieldAliases = HashMap<String, String>;

/// One attachment of a parent feature, with a download URL that embeds the
/// token it was constructed with (valid only as long as that token is).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub object_id: i64,
    pub url: String,
    pub keyword: String,
}
