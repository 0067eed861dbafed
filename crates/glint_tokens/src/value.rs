//! Token tree values
//!
//! [`TokenValue`] is the single representation used for raw exports, stripped
//! trees and resolved output. Object keys keep their document order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::reference::Template;

/// Ordered mapping used for token groups.
pub type TokenMap = IndexMap<String, TokenValue>;

/// A JSON-like token tree node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<TokenValue>),
    Object(TokenMap),
}

impl TokenValue {
    /// Empty object node.
    pub fn object() -> Self {
        Self::Object(TokenMap::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TokenMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Look up a dot-separated path (`a.b.c`), walking objects key by key.
    ///
    /// Returns `None` as soon as a step is missing or lands on a non-object.
    pub fn get_path(&self, path: &str) -> Option<&TokenValue> {
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Object(map) => map.get(segment),
            _ => None,
        })
    }

    /// All non-object leaves with their dotted paths, in document order.
    ///
    /// Arrays are treated as leaves.
    pub fn leaves(&self) -> Vec<(String, &TokenValue)> {
        let mut out = Vec::new();
        collect_leaves(self, &mut String::new(), &mut out);
        out
    }

    /// Dotted path of the first string leaf (array elements included) that
    /// still contains a `{path}` placeholder.
    pub fn find_placeholder(&self) -> Option<String> {
        fn walk(node: &TokenValue, path: &mut Vec<String>) -> Option<String> {
            match node {
                TokenValue::String(s) => {
                    if Template::parse(s).has_references() {
                        Some(path.join("."))
                    } else {
                        None
                    }
                }
                TokenValue::Array(items) => items.iter().enumerate().find_map(|(i, item)| {
                    path.push(i.to_string());
                    let found = walk(item, path);
                    path.pop();
                    found
                }),
                TokenValue::Object(map) => map.iter().find_map(|(key, value)| {
                    path.push(key.clone());
                    let found = walk(value, path);
                    path.pop();
                    found
                }),
                _ => None,
            }
        }

        walk(self, &mut Vec::new())
    }
}

fn collect_leaves<'a>(
    node: &'a TokenValue,
    prefix: &mut String,
    out: &mut Vec<(String, &'a TokenValue)>,
) {
    match node {
        TokenValue::Object(map) => {
            for (key, value) in map {
                let len = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(key);
                collect_leaves(value, prefix, out);
                prefix.truncate(len);
            }
        }
        leaf => out.push((prefix.clone(), leaf)),
    }
}

/// String form used when a value is substituted into an interpolated string.
///
/// Strings are written raw, scalars as their JSON text, composites as compact JSON.
impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Array(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<serde_json::Value> for TokenValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for TokenValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for TokenValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats become [`TokenValue::Null`].
impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<TokenMap> for TokenValue {
    fn from(map: TokenMap) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<TokenValue>> for TokenValue {
    fn from(items: Vec<TokenValue>) -> Self {
        Self::Array(items)
    }
}
