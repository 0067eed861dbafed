use thiserror::Error;

/// Errors produced while building a resolved token set.
///
/// Every variant is fatal: a token set either resolves completely or not at all.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A required bucket (`primitives`, `theme`, `modes`) or a named variant
    /// inside it (`modes.Dark`) is absent from the raw document.
    #[error("missing token section `{section}`")]
    MissingSection { section: String },

    /// A `{path}` placeholder points at nothing in its context.
    #[error("unresolved token reference `{{{path}}}`")]
    UnresolvedReference { path: String },

    /// A path transitively references itself.
    #[error("circular token reference at `{path}` ({})", .chain.join(" -> "))]
    CircularReference { path: String, chain: Vec<String> },

    /// The raw document does not have the expected shape.
    #[error("invalid token document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TokenError {
    /// The offending reference path, for reference errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnresolvedReference { path } | Self::CircularReference { path, .. } => {
                Some(path.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn circular_message_includes_chain() {
        let err = TokenError::CircularReference {
            path: "a".to_string(),
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "circular token reference at `a` (a -> b -> a)");
        assert_eq!(err.path(), Some("a"));
    }

    #[test]
    fn unresolved_message_shows_placeholder() {
        let err = TokenError::UnresolvedReference {
            path: "missing.path".to_string(),
        };
        assert_eq!(err.to_string(), "unresolved token reference `{missing.path}`");
    }
}
