//! Deferred extraction of argument values from a payload or context
//!
//! An argument written as `"$product.price"` is not a literal: it is looked up
//! at transform time. This module holds the marker type, the context that
//! extractions may read from, and the [`ExtractionResolver`] seam with its
//! default accessor-path implementation.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod accessor;

pub use accessor::{AccessorExtractor, AccessorPath, PathSegment};

use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Prefix marking a configuration string as a deferred extraction
pub const EXTRACTION_PREFIX: char = '$';

/// Errors raised while resolving an extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Invalid accessor \"{accessor}\": {message}")]
    InvalidAccessor { accessor: String, message: String },

    #[error("Unknown context key \"{key}\" in accessor \"{accessor}\"")]
    UnknownContextKey { accessor: String, key: String },

    #[error("Path segment \"{segment}\" not found for accessor \"{accessor}\"")]
    PathNotFound { accessor: String, segment: String },

    #[error("Cannot traverse {found} with segment \"{segment}\" for accessor \"{accessor}\"")]
    NotTraversable {
        accessor: String,
        segment: String,
        found: String,
    },
}

/// Deferred lookup of a value, identified by its accessor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extraction {
    accessor: String,
}

impl Extraction {
    pub fn new(accessor: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
        }
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    /// Parse a configuration string, returning `None` for literals
    pub fn parse_marker(raw: &str) -> Option<Self> {
        raw.strip_prefix(EXTRACTION_PREFIX).map(Self::new)
    }

    /// Strip one escaping backslash from a literal such as `\$10`
    pub fn unescape(raw: &str) -> Cow<'_, str> {
        match raw.strip_prefix('\\') {
            Some(rest) if Self::is_escaped_marker(rest) => Cow::Borrowed(rest),
            _ => Cow::Borrowed(raw),
        }
    }

    /// Escape a literal so it is not read back as a marker
    pub fn escape(literal: &str) -> Cow<'_, str> {
        if Self::is_escaped_marker(literal) {
            Cow::Owned(format!("\\{literal}"))
        } else {
            Cow::Borrowed(literal)
        }
    }

    fn is_escaped_marker(text: &str) -> bool {
        text.trim_start_matches('\\').starts_with(EXTRACTION_PREFIX)
    }

    /// Marker string form, as written in configuration
    pub fn to_marker(&self) -> String {
        format!("{EXTRACTION_PREFIX}{}", self.accessor)
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_marker())
    }
}

/// Named values an extraction may address with `key::path`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionContext {
    values: HashMap<String, Value>,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Resolves deferred extractions against a payload and context
pub trait ExtractionResolver: Send + Sync + fmt::Debug {
    fn extract(
        &self,
        extraction: &Extraction,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Value, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_parsing() {
        assert_eq!(Extraction::parse_marker("$a.b"), Some(Extraction::new("a.b")));
        assert_eq!(Extraction::parse_marker("$"), Some(Extraction::new("")));
        assert_eq!(Extraction::parse_marker("a.b"), None);
        assert_eq!(Extraction::new("x::y").to_string(), "$x::y");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(Extraction::unescape("\\$10"), "$10");
        assert_eq!(Extraction::unescape("\\n"), "\\n");
        assert_eq!(Extraction::escape("$10"), "\\$10");
        assert_eq!(Extraction::escape("\\$10"), "\\\\$10");
        assert_eq!(Extraction::escape("plain"), "plain");
    }
}
