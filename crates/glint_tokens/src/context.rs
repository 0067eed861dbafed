//! Lookup namespaces for reference resolution
//!
//! A [`Context`] is the shallow merge of an ordered list of named layers.
//! Layers are applied in order and a later layer replaces an earlier layer's
//! top-level entry with the same key. Nested groups are never merged.

use crate::error::TokenError;
use crate::value::{TokenMap, TokenValue};

/// Merged namespace that `{path}` references are looked up in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    entries: TokenMap,
    layers: Vec<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from layers, applied first to last.
    pub fn layered<'a, I, S>(layers: I) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = (S, &'a TokenValue)>,
        S: Into<String>,
    {
        layers
            .into_iter()
            .try_fold(Self::new(), |ctx, (name, tree)| ctx.with_layer(name, tree))
    }

    /// Merge `tree` on top of the current namespace.
    ///
    /// `tree` must be an object; its top-level entries override existing ones.
    pub fn with_layer(
        mut self,
        name: impl Into<String>,
        tree: &TokenValue,
    ) -> Result<Self, TokenError> {
        let name = name.into();
        let TokenValue::Object(entries) = tree else {
            return Err(TokenError::InvalidDocument(format!(
                "context layer `{name}` must be an object, found {}",
                tree.kind()
            )));
        };

        for (key, value) in entries {
            if self.entries.insert(key.clone(), value.clone()).is_some() {
                tracing::trace!("context layer `{}` overrides `{}`", name, key);
            }
        }

        self.layers.push(name);
        Ok(self)
    }

    /// Dotted-segment lookup (`a.b.c`).
    pub fn lookup(&self, path: &str) -> Option<&TokenValue> {
        match path.split_once('.') {
            Some((head, rest)) => self.entries.get(head)?.get_path(rest),
            None => self.entries.get(path),
        }
    }

    /// Layer names in application order.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// The merged top-level entries.
    pub fn entries(&self) -> &TokenMap {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn later_layers_win() {
        let primitives = TokenValue::from(json!({
            "color": { "red": "#f00" },
            "size": 4
        }));
        let theme = TokenValue::from(json!({ "color": { "brand": "{color.red}" } }));

        let ctx = Context::layered([("primitives", &primitives), ("theme", &theme)]).unwrap();

        // shallow: theme's `color` group replaces the primitive one entirely
        assert_eq!(ctx.lookup("color.red"), None);
        assert_eq!(
            ctx.lookup("color.brand"),
            Some(&TokenValue::from("{color.red}"))
        );
        assert_eq!(ctx.lookup("size"), Some(&TokenValue::from(4i64)));
        assert_eq!(ctx.layers(), &["primitives".to_string(), "theme".to_string()]);
    }

    #[test]
    fn non_object_layer_is_rejected() {
        let scalar = TokenValue::from(3i64);
        let err = Context::new().with_layer("broken", &scalar).unwrap_err();
        assert!(matches!(err, TokenError::InvalidDocument(_)));
    }

    #[test]
    fn empty_context_finds_nothing() {
        assert_eq!(Context::new().lookup("missing.path"), None);
        assert_eq!(Context::default().lookup("a"), None);
    }
}
