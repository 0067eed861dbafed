//! Reference resolution
//!
//! Walks a token tree and replaces `{path}` placeholders with values looked up
//! in a [`Context`]:
//!
//! - a string that is exactly one placeholder resolves to the referenced value
//!   itself, so `"{size.sm}"` can become the number `4`;
//! - any other string containing placeholders resolves every placeholder,
//!   stringifies it and substitutes it, always producing a string;
//! - referenced strings are resolved again, so aliases may chain.
//!
//! Cycle detection uses a [`ResolutionStack`] of the paths being dereferenced.
//! Each dereference works on an extended copy, so sibling branches never see
//! each other's in-flight paths.

use crate::context::Context;
use crate::error::TokenError;
use crate::reference::{Segment, Template};
use crate::value::{TokenMap, TokenValue};

/// Paths currently being dereferenced, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionStack {
    paths: Vec<String>,
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn depth(&self) -> usize {
        self.paths.len()
    }

    /// A copy of this stack with `path` pushed on top.
    ///
    /// Fails with [`TokenError::CircularReference`] if `path` is already on it.
    pub fn extended(&self, path: &str) -> Result<Self, TokenError> {
        if self.contains(path) {
            let mut chain = self.paths.clone();
            chain.push(path.to_string());
            return Err(TokenError::CircularReference {
                path: path.to_string(),
                chain,
            });
        }

        let mut paths = Vec::with_capacity(self.paths.len() + 1);
        paths.extend(self.paths.iter().cloned());
        paths.push(path.to_string());
        Ok(Self { paths })
    }
}

/// Resolves token trees against a single [`Context`].
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'c> {
    context: &'c Context,
}

impl<'c> Resolver<'c> {
    pub fn new(context: &'c Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'c Context {
        self.context
    }

    /// Resolve every placeholder in `node`.
    pub fn resolve(&self, node: &TokenValue) -> Result<TokenValue, TokenError> {
        self.resolve_with(node, &ResolutionStack::new())
    }

    /// Resolve `node` with paths already in flight.
    pub fn resolve_with(
        &self,
        node: &TokenValue,
        stack: &ResolutionStack,
    ) -> Result<TokenValue, TokenError> {
        match node {
            TokenValue::String(s) => self.resolve_str(s, stack),
            TokenValue::Array(items) => items
                .iter()
                .map(|item| self.resolve_with(item, stack))
                .collect::<Result<Vec<_>, _>>()
                .map(TokenValue::Array),
            TokenValue::Object(map) => map
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.resolve_with(value, stack)?)))
                .collect::<Result<TokenMap, TokenError>>()
                .map(TokenValue::Object),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_str(&self, s: &str, stack: &ResolutionStack) -> Result<TokenValue, TokenError> {
        let template = Template::parse(s);

        if let Some(path) = template.as_pure_reference() {
            return self.dereference(path, stack);
        }
        if !template.has_references() {
            return Ok(TokenValue::String(s.to_string()));
        }

        let mut out = String::with_capacity(s.len());
        for segment in template.segments() {
            match *segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Reference(path) => {
                    out.push_str(&self.dereference(path, stack)?.to_string());
                }
            }
        }
        Ok(TokenValue::String(out))
    }

    /// Look up `path` and fully resolve whatever it points at.
    fn dereference(&self, path: &str, stack: &ResolutionStack) -> Result<TokenValue, TokenError> {
        let stack = stack.extended(path)?;
        let target = self
            .context
            .lookup(path)
            .ok_or_else(|| TokenError::UnresolvedReference {
                path: path.to_string(),
            })?;

        tracing::trace!(
            "deref `{}` -> {} (depth {})",
            path,
            target.kind(),
            stack.depth()
        );
        self.resolve_with(target, &stack)
    }
}
