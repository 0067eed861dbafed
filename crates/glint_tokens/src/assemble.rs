//! Section assembly
//!
//! Turns a [`TokenDocument`] into [`ResolvedTokens`] in one pass:
//!
//! 1. pick the primitives, theme and modes sections by key prefix
//! 2. strip each section
//! 3. select variants (every required mode, plus the optional default variant
//!    of the primitives and theme sections)
//! 4. build contexts: `primitives ⊕ theme` for the shared sections and
//!    `primitives ⊕ theme ⊕ mode` for each mode, later layers winning
//! 5. resolve every variant against its context
//!
//! Missing sections are reported before any reference is resolved.

use indexmap::IndexMap;
use serde::Serialize;

use crate::context::Context;
use crate::document::{Section, SectionLayout, TokenDocument};
use crate::error::TokenError;
use crate::resolve::Resolver;
use crate::strip::Stripper;
use crate::value::TokenValue;

/// Fully resolved token tables.
///
/// Built once at start-up and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedTokens {
    primitives: TokenValue,
    theme: TokenValue,
    modes: IndexMap<String, TokenValue>,
}

impl ResolvedTokens {
    /// Resolve a JSON export with the default layout and stripper.
    pub fn from_json_str(src: &str) -> Result<Self, TokenError> {
        Assembler::default().assemble(&TokenDocument::from_json_str(src)?)
    }

    pub fn primitives(&self) -> &TokenValue {
        &self.primitives
    }

    pub fn theme(&self) -> &TokenValue {
        &self.theme
    }

    pub fn mode(&self, name: &str) -> Option<&TokenValue> {
        self.modes.get(name)
    }

    /// Mode names in layout order.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    pub fn modes(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.modes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tree for a scope: `primitives`, `theme`, or a mode name.
    pub fn scope(&self, scope: &str) -> Option<&TokenValue> {
        match scope {
            "primitives" => Some(&self.primitives),
            "theme" => Some(&self.theme),
            mode => self.mode(mode),
        }
    }

    /// Look up a resolved value by dotted path within a scope.
    pub fn lookup(&self, scope: &str, path: &str) -> Option<&TokenValue> {
        self.scope(scope)?.get_path(path)
    }
}

/// Drives stripping, context construction and resolution.
#[derive(Clone, Debug, Default)]
pub struct Assembler {
    layout: SectionLayout,
    stripper: Stripper,
}

/// Stripped variants, all present, not yet resolved.
struct Variants {
    primitives: TokenValue,
    theme: TokenValue,
    modes: Vec<(String, TokenValue)>,
}

impl Assembler {
    pub fn new(layout: SectionLayout, stripper: Stripper) -> Self {
        Self { layout, stripper }
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    pub fn stripper(&self) -> &Stripper {
        &self.stripper
    }

    pub fn assemble(&self, doc: &TokenDocument) -> Result<ResolvedTokens, TokenError> {
        let variants = self.collect_variants(doc)?;

        let shared = Context::layered([
            (Section::Primitives.id(), &variants.primitives),
            (Section::Theme.id(), &variants.theme),
        ])?;
        let shared_resolver = Resolver::new(&shared);

        let primitives = shared_resolver.resolve(&variants.primitives)?;
        let theme = shared_resolver.resolve(&variants.theme)?;

        let mut modes = IndexMap::with_capacity(variants.modes.len());
        for (name, tree) in &variants.modes {
            let context = shared.clone().with_layer(name.as_str(), tree)?;
            let resolved = Resolver::new(&context).resolve(tree)?;
            tracing::debug!(
                "resolved mode `{}` ({} tokens)",
                name,
                resolved.leaves().len()
            );
            modes.insert(name.clone(), resolved);
        }

        tracing::debug!(
            "resolved token set: {} primitives, {} theme tokens, {} modes",
            primitives.leaves().len(),
            theme.leaves().len(),
            modes.len()
        );

        Ok(ResolvedTokens {
            primitives,
            theme,
            modes,
        })
    }

    /// Classify, strip and select every variant, failing on the first gap.
    fn collect_variants(&self, doc: &TokenDocument) -> Result<Variants, TokenError> {
        let mut primitives = None;
        let mut theme = None;
        let mut modes = None;

        for (key, value) in doc.sections() {
            let Some(section) = self.layout.classify(key) else {
                tracing::debug!("ignoring unrecognized token section `{}`", key);
                continue;
            };
            let slot = match section {
                Section::Primitives => &mut primitives,
                Section::Theme => &mut theme,
                Section::Modes => &mut modes,
            };
            if slot.is_some() {
                tracing::warn!(
                    "duplicate {} section `{}` ignored; the first one wins",
                    section,
                    key
                );
                continue;
            }
            tracing::debug!("section `{}` -> {}", key, section);
            *slot = Some(self.stripper.strip(value.clone()));
        }

        let primitives = self.shared_variant(Section::Primitives, primitives)?;
        let theme = self.shared_variant(Section::Theme, theme)?;
        let modes_tree = modes.ok_or_else(|| missing(Section::Modes.id()))?;

        let modes = self
            .layout
            .mode_names
            .iter()
            .map(|name| {
                modes_tree
                    .as_object()
                    .and_then(|map| map.get(name))
                    .map(|tree| (name.clone(), tree.clone()))
                    .ok_or_else(|| missing(&format!("{}.{}", Section::Modes, name)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Variants {
            primitives,
            theme,
            modes,
        })
    }

    fn shared_variant(
        &self,
        section: Section,
        tree: Option<TokenValue>,
    ) -> Result<TokenValue, TokenError> {
        let tree = tree.ok_or_else(|| missing(section.id()))?;
        match &self.layout.variant {
            None => Ok(tree),
            Some(variant) => {
                take_child(tree, variant).ok_or_else(|| missing(&format!("{section}.{variant}")))
            }
        }
    }
}

fn missing(section: &str) -> TokenError {
    TokenError::MissingSection {
        section: section.to_string(),
    }
}

/// Owned child of an object by exact key (no dot splitting).
fn take_child(tree: TokenValue, key: &str) -> Option<TokenValue> {
    match tree {
        TokenValue::Object(mut map) => map.swap_remove(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> TokenDocument {
        TokenDocument::from_value(TokenValue::from(v)).unwrap()
    }

    #[test]
    fn default_variant_is_selected() {
        let assembler = Assembler::new(
            SectionLayout::default()
                .with_variant("Mode 1")
                .with_mode_names(["Light"]),
            Stripper::default(),
        );
        let tokens = assembler
            .assemble(&doc(json!([
                { "1. Primitives": { "Mode 1": { "space": { "sm": { "$value": 4 } } } } },
                { "2. Theme": { "Mode 1": { "gap": { "$value": "{space.sm}" } } } },
                { "3. Modes": { "Light": { "pad": { "$value": "{gap}px" } } } }
            ])))
            .unwrap();

        assert_eq!(tokens.lookup("primitives", "space.sm"), Some(&TokenValue::from(4i64)));
        assert_eq!(tokens.lookup("theme", "gap"), Some(&TokenValue::from(4i64)));
        assert_eq!(tokens.lookup("Light", "pad"), Some(&TokenValue::from("4px")));
    }

    #[test]
    fn missing_default_variant_fails() {
        let assembler = Assembler::new(
            SectionLayout::default().with_variant("Mode 1"),
            Stripper::default(),
        );
        let err = assembler
            .assemble(&doc(json!([
                { "1. Primitives": { "Value": {} } },
                { "2. Theme": { "Mode 1": {} } },
                { "3. Modes": { "Light": {}, "Dark": {} } }
            ])))
            .unwrap_err();

        assert_eq!(err.to_string(), "missing token section `primitives.Mode 1`");
    }

    #[test]
    fn duplicate_sections_keep_first() {
        let tokens = Assembler::default()
            .assemble(&doc(json!([
                { "1. Primitives": { "a": 1 } },
                { "1. Primitives (old)": { "a": 2 } },
                { "2. Theme": {} },
                { "3. Modes": { "Light": {}, "Dark": {} } }
            ])))
            .unwrap();

        assert_eq!(tokens.lookup("primitives", "a"), Some(&TokenValue::from(1i64)));
    }

    #[test]
    fn scope_lookup() {
        let tokens = Assembler::default()
            .assemble(&doc(json!([
                { "1. Primitives": { "a": 1 } },
                { "2. Theme": { "b": "{a}" } },
                { "3. Modes": { "Light": { "c": "{b}" }, "Dark": { "c": 3 } } }
            ])))
            .unwrap();

        assert_eq!(tokens.lookup("theme", "b"), Some(&TokenValue::from(1i64)));
        assert_eq!(tokens.lookup("Light", "c"), Some(&TokenValue::from(1i64)));
        assert_eq!(tokens.lookup("Dark", "c"), Some(&TokenValue::from(3i64)));
        assert_eq!(tokens.lookup("Sepia", "c"), None);
        assert_eq!(tokens.mode_names().collect::<Vec<_>>(), vec!["Light", "Dark"]);
    }
}
