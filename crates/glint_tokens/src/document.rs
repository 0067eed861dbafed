//! Raw token documents and section layout
//!
//! An export is a JSON array of single-key objects:
//!
//! ```json
//! [
//!   { "1. Primitives": { "space": { "sm": { "$value": 4 } } } },
//!   { "2. Theme":      { "radius": { "$value": "{space.sm}" } } },
//!   { "3. Modes":      { "Light": { .. }, "Dark": { .. } } }
//! ]
//! ```
//!
//! The key prefix decides which bucket a section belongs to; see [`SectionLayout`].

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::value::TokenValue;

/// The three buckets of a token export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// Base scales with no mode dependency.
    Primitives,
    /// Shared tokens layered on primitives.
    Theme,
    /// Per-appearance-mode tokens.
    Modes,
}

impl Section {
    /// Stable id used in output and error messages.
    pub fn id(self) -> &'static str {
        match self {
            Self::Primitives => "primitives",
            Self::Theme => "theme",
            Self::Modes => "modes",
        }
    }

    pub fn all() -> &'static [Section] {
        const SECTIONS: [Section; 3] = [Section::Primitives, Section::Theme, Section::Modes];
        &SECTIONS
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn default_primitives_prefix() -> String {
    "1.".to_string()
}

fn default_theme_prefix() -> String {
    "2.".to_string()
}

fn default_modes_prefix() -> String {
    "3.".to_string()
}

fn default_mode_names() -> Vec<String> {
    vec!["Light".to_string(), "Dark".to_string()]
}

/// How raw sections map onto buckets and variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    /// Key prefix of the primitives section
    #[serde(default = "default_primitives_prefix")]
    pub primitives: String,
    /// Key prefix of the theme section
    #[serde(default = "default_theme_prefix")]
    pub theme: String,
    /// Key prefix of the modes section
    #[serde(default = "default_modes_prefix")]
    pub modes: String,
    /// Mode variants that must exist under the modes section
    #[serde(default = "default_mode_names")]
    pub mode_names: Vec<String>,
    /// Variant key selected inside the primitives and theme sections.
    /// `None` uses the whole section.
    #[serde(default)]
    pub variant: Option<String>,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            primitives: default_primitives_prefix(),
            theme: default_theme_prefix(),
            modes: default_modes_prefix(),
            mode_names: default_mode_names(),
            variant: None,
        }
    }
}

impl SectionLayout {
    pub fn prefix(&self, section: Section) -> &str {
        match section {
            Section::Primitives => &self.primitives,
            Section::Theme => &self.theme,
            Section::Modes => &self.modes,
        }
    }

    /// Bucket a raw section key belongs to, if any.
    pub fn classify(&self, key: &str) -> Option<Section> {
        Section::all()
            .iter()
            .copied()
            .find(|&section| key.starts_with(self.prefix(section)))
    }

    pub fn with_mode_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mode_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// A raw export: named top-level sections in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenDocument {
    sections: Vec<(String, TokenValue)>,
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(src: &str) -> Result<Self, TokenError> {
        let value: TokenValue = serde_json::from_str(src)?;
        Self::from_value(value)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, TokenError> {
        let value: TokenValue = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Accepts an array of single-key objects, or one object whose entries
    /// are the sections.
    pub fn from_value(value: TokenValue) -> Result<Self, TokenError> {
        match value {
            TokenValue::Array(entries) => {
                let mut doc = Self::new();
                for (index, entry) in entries.into_iter().enumerate() {
                    let TokenValue::Object(map) = entry else {
                        return Err(TokenError::InvalidDocument(format!(
                            "entry {index} must be an object, found {}",
                            entry.kind()
                        )));
                    };
                    if map.len() != 1 {
                        return Err(TokenError::InvalidDocument(format!(
                            "entry {index} must have exactly one key, found {}",
                            map.len()
                        )));
                    }
                    doc.sections.extend(map);
                }
                Ok(doc)
            }
            TokenValue::Object(map) => Ok(Self {
                sections: map.into_iter().collect(),
            }),
            other => Err(TokenError::InvalidDocument(format!(
                "top level must be an array of sections, found {}",
                other.kind()
            ))),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: TokenValue) {
        self.sections.push((key.into(), value));
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
