//! Glint design-token resolver
//!
//! Turns a raw design-token export into fully resolved token tables.
//!
//! # Overview
//!
//! A token export is a JSON document whose leaves are wrapped as
//! `{ "$value": .. }` and whose values may reference other tokens with
//! `{path.to.token}` placeholders. Resolution runs once at start-up:
//!
//! - **Stripping** ([`Stripper`]): unwraps leaf wrappers and renames aliased keys
//! - **Assembly** ([`Assembler`]): splits the export into primitives, theme and
//!   per-mode sections and builds a lookup [`Context`] for each
//! - **Resolution** ([`Resolver`]): replaces placeholders, following alias
//!   chains and rejecting cycles and dangling references
//!
//! # Quick Start
//!
//! ```rust
//! use glint_tokens::{ResolvedTokens, TokenValue};
//!
//! let tokens = ResolvedTokens::from_json_str(r##"[
//!     { "1. Primitives": { "space": { "sm": { "$value": 4 } } } },
//!     { "2. Theme": { "gap": { "$value": "{space.sm}" } } },
//!     { "3. Modes": {
//!         "Light": { "padding": { "$value": "{gap}px {gap}px" } },
//!         "Dark":  { "padding": { "$value": "{space.sm}px" } }
//!     } }
//! ]"##)?;
//!
//! assert_eq!(tokens.lookup("theme", "gap"), Some(&TokenValue::from(4i64)));
//! assert_eq!(tokens.lookup("Light", "padding"), Some(&TokenValue::from("4px 4px")));
//! # Ok::<(), glint_tokens::TokenError>(())
//! ```
//!
//! # Errors
//!
//! Every failure is fatal for the whole token set; see [`TokenError`].

mod assemble;
mod context;
mod document;
mod error;
mod reference;
mod resolve;
mod strip;
mod value;

pub use assemble::{Assembler, ResolvedTokens};
pub use context::Context;
pub use document::{Section, SectionLayout, TokenDocument};
pub use error::TokenError;
pub use reference::{Segment, Template};
pub use resolve::{ResolutionStack, Resolver};
pub use strip::{Stripper, DEFAULT_PAYLOAD_KEY};
pub use value::{TokenMap, TokenValue};
