//! Metadata stripping
//!
//! Token exports wrap every leaf as `{ "$value": .. }` (often next to `$type`
//! or `$description`). Stripping replaces each wrapper with its payload and
//! renames keys listed in the alias table. Reference strings are left verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::TokenValue;

/// Default payload key of a leaf wrapper.
pub const DEFAULT_PAYLOAD_KEY: &str = "$value";

fn default_payload_key() -> String {
    DEFAULT_PAYLOAD_KEY.to_string()
}

/// Normalizes raw export trees into plain token trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stripper {
    /// Key that marks an object as a leaf wrapper
    #[serde(default = "default_payload_key")]
    pub payload_key: String,
    /// Raw key -> replacement key (e.g. keys with a leading emoji)
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
}

impl Default for Stripper {
    fn default() -> Self {
        Self {
            payload_key: default_payload_key(),
            aliases: IndexMap::new(),
        }
    }
}

impl Stripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key rename.
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    pub fn with_payload_key(mut self, key: impl Into<String>) -> Self {
        self.payload_key = key.into();
        self
    }

    /// Strip a raw tree. Never fails; unknown shapes pass through unchanged.
    ///
    /// If two keys of one object map to the same name, the later entry's
    /// value wins and keeps the earlier entry's position.
    pub fn strip(&self, value: TokenValue) -> TokenValue {
        match value {
            TokenValue::Object(mut map) => {
                if let Some(payload) = map.swap_remove(&self.payload_key) {
                    return payload;
                }
                TokenValue::Object(
                    map.into_iter()
                        .map(|(key, value)| (self.rename(key), self.strip(value)))
                        .collect(),
                )
            }
            TokenValue::Array(items) => {
                TokenValue::Array(items.into_iter().map(|v| self.strip(v)).collect())
            }
            other => other,
        }
    }

    fn rename(&self, key: String) -> String {
        match self.aliases.get(&key) {
            Some(alias) => alias.clone(),
            None => key,
        }
    }
}
