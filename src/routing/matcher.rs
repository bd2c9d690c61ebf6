//! Path pattern matching logic.
//!
//! # Responsibilities
//! - Compile a URL pattern into literal and placeholder segments
//! - Match a normalized path against a compiled pattern
//! - Collect placeholder captures
//!
//! # Design Decisions
//! - Anchored at both ends: segment counts must be equal
//! - Literal segments are compared byte-for-byte (case-sensitive)
//! - A placeholder matches one or more non-`/` characters, never an empty segment
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile `pattern`. Segments starting with `:` become named placeholders.
    pub fn compile(pattern: &str) -> Self {
        let segments = pattern
            .trim_start_matches('/')
            .split('/')
            .map(|token| match token.strip_prefix(':') {
                Some(name) => Segment::Placeholder(name.to_string()),
                None => Segment::Literal(token.to_string()),
            })
            .collect();

        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    /// The pattern text this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a path that already starts with `/`.
    ///
    /// Returns the placeholder captures on success.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    captures.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(captures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_segments() {
        let pattern = PathPattern::compile("/user/:user_name/status/:id");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("user".into()),
                Segment::Placeholder("user_name".into()),
                Segment::Literal("status".into()),
                Segment::Placeholder("id".into()),
            ]
        );
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::compile("/");
        assert!(pattern.captures("/").is_some());
        assert!(pattern.captures("/account").is_none());
    }

    #[test]
    fn test_exact_length() {
        let pattern = PathPattern::compile("/user/:user_name");
        assert!(pattern.captures("/user/alice/status/5").is_none());
        assert!(pattern.captures("/user").is_none());
    }

    #[test]
    fn test_placeholder_rejects_empty_segment() {
        let pattern = PathPattern::compile("/account/:action");
        assert!(pattern.captures("/account/").is_none());
        assert_eq!(
            pattern.captures("/account/signin").unwrap().get("action").map(String::as_str),
            Some("signin")
        );
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let pattern = PathPattern::compile("/status/post");
        assert!(pattern.captures("/status/post").is_some());
        assert!(pattern.captures("/Status/post").is_none());
    }
}
