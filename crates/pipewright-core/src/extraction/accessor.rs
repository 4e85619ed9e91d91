//! Accessor paths and the default extraction resolver
//!
//! Accessor grammar:
//!
//! ```text
//! accessor := [ context_key "::" ] path
//! path     := "" | segment { "." segment }
//! ```
//!
//! An empty path selects the root. Numeric segments index into arrays and
//! are looked up by their exact text on objects, so `a.007` reads key `"007"`.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{Extraction, ExtractionContext, ExtractionError, ExtractionResolver};
use serde_json::Value;
use std::fmt;

const CONTEXT_SEPARATOR: &str = "::";
const PATH_SEPARATOR: char = '.';

/// A single step of an accessor path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index { position: usize, text: String },
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index { text, .. } => write!(f, "{text}"),
        }
    }
}

/// Parsed accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPath {
    context_key: Option<String>,
    segments: Vec<PathSegment>,
}

impl AccessorPath {
    pub fn parse(accessor: &str) -> Result<Self, ExtractionError> {
        let (context_key, path) = match accessor.split_once(CONTEXT_SEPARATOR) {
            Some((key, path)) => {
                if key.is_empty() {
                    return Err(ExtractionError::InvalidAccessor {
                        accessor: accessor.to_string(),
                        message: "context key must not be empty".to_string(),
                    });
                }
                (Some(key.to_string()), path)
            }
            None => (None, accessor),
        };

        if path.is_empty() {
            return Ok(Self {
                context_key,
                segments: Vec::new(),
            });
        }

        let segments = path
            .split(PATH_SEPARATOR)
            .map(|segment| {
                if segment.is_empty() {
                    return Err(ExtractionError::InvalidAccessor {
                        accessor: accessor.to_string(),
                        message: "path contains an empty segment".to_string(),
                    });
                }
                Ok(match segment.parse::<usize>() {
                    Ok(position) => PathSegment::Index {
                        position,
                        text: segment.to_string(),
                    },
                    Err(_) => PathSegment::Key(segment.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            context_key,
            segments,
        })
    }

    pub fn context_key(&self) -> Option<&str> {
        self.context_key.as_deref()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Walk the path from `root`
    pub fn select<'a>(&self, accessor: &str, root: &'a Value) -> Result<&'a Value, ExtractionError> {
        self.segments.iter().try_fold(root, |current, segment| {
            let not_found = || ExtractionError::PathNotFound {
                accessor: accessor.to_string(),
                segment: segment.to_string(),
            };

            match (current, segment) {
                (Value::Object(map), PathSegment::Key(key)) => map.get(key).ok_or_else(not_found),
                (Value::Object(map), PathSegment::Index { text, .. }) => map.get(text).ok_or_else(not_found),
                (Value::Array(items), PathSegment::Index { position, .. }) => {
                    items.get(*position).ok_or_else(not_found)
                }
                (other, _) => Err(ExtractionError::NotTraversable {
                    accessor: accessor.to_string(),
                    segment: segment.to_string(),
                    found: type_name(other).to_string(),
                }),
            }
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Default resolver: accessor paths over the payload, or over a context entry
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessorExtractor;

impl AccessorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionResolver for AccessorExtractor {
    fn extract(
        &self,
        extraction: &Extraction,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Value, ExtractionError> {
        let accessor = extraction.accessor();
        let path = AccessorPath::parse(accessor)?;

        let root = match path.context_key() {
            Some(key) => context.and_then(|ctx| ctx.get(key)).ok_or_else(|| {
                ExtractionError::UnknownContextKey {
                    accessor: accessor.to_string(),
                    key: key.to_string(),
                }
            })?,
            None => payload,
        };

        path.select(accessor, root).cloned()
    }
}
