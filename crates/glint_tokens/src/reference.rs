//! `{path}` placeholder scanning
//!
//! A placeholder is `{`, one or more characters other than braces, then `}`.
//! There is no escaping: an unterminated `{`, a stray `}` or an empty `{}` is
//! not a placeholder and stays in the string as literal text.

use std::sync::OnceLock;

use regex::Regex;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"))
}

/// One piece of a scanned string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Reference(&'a str),
}

/// A string split into literal text and `{path}` references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in placeholder_regex().captures_iter(source) {
            let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Literal(&source[cursor..whole.start()]));
            }
            segments.push(Segment::Reference(path.as_str()));
            cursor = whole.end();
        }

        if cursor < source.len() {
            segments.push(Segment::Literal(&source[cursor..]));
        }

        Self { source, segments }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn has_references(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Reference(_)))
    }

    /// The path when the whole string is exactly one placeholder.
    pub fn as_pure_reference(&self) -> Option<&'a str> {
        match self.segments.as_slice() {
            [Segment::Reference(path)] => Some(*path),
            _ => None,
        }
    }

    /// Referenced paths in order of appearance (duplicates kept).
    pub fn references(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Reference(path) => Some(*path),
            Segment::Literal(_) => None,
        })
    }
}
