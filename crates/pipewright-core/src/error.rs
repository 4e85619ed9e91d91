//! Error types for the Pipewright core library
//!
//! Two failure channels are kept apart here. Argument validation failures
//! ([`ArgumentValidationError`]) describe bad transformer configuration and
//! carry enough diagnostics to locate the offending configuration line.
//! Everything else (bad input data, extraction problems, unknown transformers,
//! pipeline configuration) is folded into the crate-level [`Error`].
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion::CoercionError;
use crate::enums::UnknownVariantError;
use crate::extraction::ExtractionError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Main error type for Pipewright operations
#[derive(Error, Debug)]
pub enum Error {
    /// A transformer received arguments it could not validate
    #[error(transparent)]
    InvalidArguments(#[from] Box<ArgumentValidationError>),

    /// The data being transformed is not usable by the transformer
    #[error("Invalid input data for transformation {transformer}: {}", .errors.join("; "))]
    InvalidInputData {
        transformer: String,
        errors: Vec<String>,
        arguments: Option<ArgumentIterator>,
        data: Value,
    },

    /// Extraction surfaced to the caller instead of being coalesced to null
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Pipeline or argument configuration could not be interpreted
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        context: Option<String>,
    },

    /// No transformer registered under the requested name
    #[error("Unknown transformer: {name}")]
    UnknownTransformer {
        name: String,
        available: Vec<String>,
    },

    /// A pipeline stage failed
    #[error("Pipeline stage {stage} ({transformer}) failed: {source}")]
    Stage {
        stage: usize,
        transformer: String,
        #[source]
        source: Box<Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an input data error for the given transformer
    pub fn invalid_input_data(
        transformer: impl Into<String>,
        message: impl Into<String>,
        arguments: Option<&ArgumentIterator>,
        data: &Value,
    ) -> Self {
        Error::InvalidInputData {
            transformer: transformer.into(),
            errors: vec![message.into()],
            arguments: arguments.cloned(),
            data: data.clone(),
        }
    }

    /// The argument validation failure behind this error, if any
    pub fn as_argument_error(&self) -> Option<&ArgumentValidationError> {
        match self {
            Error::InvalidArguments(err) => Some(err),
            Error::Stage { source, .. } => source.as_argument_error(),
            _ => None,
        }
    }
}

impl From<ArgumentValidationError> for Error {
    fn from(err: ArgumentValidationError) -> Self {
        Error::InvalidArguments(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Category of an argument validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    /// No value supplied and no default configured
    Missing,
    /// A string that matches no member of the target enumeration
    Unrecognised,
    /// A value whose type cannot be coerced at all
    InvalidType,
    /// Correct type, but outside the accepted range
    OutOfRange,
    /// A nested element of a compound argument failed to decode
    Structural,
}

impl fmt::Display for ArgumentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentErrorKind::Missing => write!(f, "missing"),
            ArgumentErrorKind::Unrecognised => write!(f, "unrecognised"),
            ArgumentErrorKind::InvalidType => write!(f, "invalid type"),
            ArgumentErrorKind::OutOfRange => write!(f, "out of range"),
            ArgumentErrorKind::Structural => write!(f, "structural"),
        }
    }
}

/// Underlying cause attached to an argument validation failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentErrorCause {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariantError),

    #[error(transparent)]
    Nested(#[from] Box<ArgumentValidationError>),
}

/// Structured failure raised when a transformer argument cannot be coerced
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid argument for transformation {transformer}: {}", .errors.join("; "))]
pub struct ArgumentValidationError {
    /// Name of the transformer owning the argument
    pub transformer: String,
    /// Failure category
    pub kind: ArgumentErrorKind,
    /// Human readable messages
    pub errors: Vec<String>,
    /// The unresolved arguments, kept for diagnostics
    pub arguments: Option<ArgumentIterator>,
    /// The extraction payload, kept for diagnostics
    pub payload: Value,
    #[source]
    pub source: Option<ArgumentErrorCause>,
}

impl ArgumentValidationError {
    /// Create a validation error with a single message
    pub fn new(
        transformer: impl Into<String>,
        kind: ArgumentErrorKind,
        message: impl Into<String>,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
    ) -> Self {
        Self {
            transformer: transformer.into(),
            kind,
            errors: vec![message.into()],
            arguments: arguments.cloned(),
            payload: payload.clone(),
            source: None,
        }
    }

    /// Translate a coercion failure for the named argument at `key`
    pub fn from_coercion(
        transformer: impl Into<String>,
        key: &ArgumentKey,
        argument_name: &str,
        error: CoercionError,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
    ) -> Self {
        let kind = error.kind();
        let message = match &error {
            CoercionError::Missing => {
                format!("{argument_name} argument ({key}) is required")
            }
            CoercionError::Unrecognised { value, source } => format!(
                "Unrecognised {argument_name} argument ({key}) value: {value}. Expected one of: {}",
                source.expected.join(", ")
            ),
            CoercionError::InvalidType { expected, received } => format!(
                "Invalid {argument_name} argument ({key}): expected {expected}, received {received}"
            ),
            CoercionError::OutOfRange { expected, received } => format!(
                "{argument_name} argument ({key}) must be {expected}, received {received}"
            ),
            CoercionError::InvalidElement {
                element,
                expected,
                received,
            } => format!(
                "Invalid {argument_name} argument ({key}): element {element} must be {expected}, received {received}"
            ),
        };

        let mut err = Self::new(transformer, kind, message, arguments, payload);
        if let CoercionError::Unrecognised { source, .. } = error {
            err.source = Some(ArgumentErrorCause::UnknownVariant(source));
        }
        err
    }

    /// Wrap a child decode failure, prefixing each message with the element position
    pub fn nested(
        transformer: impl Into<String>,
        element: &str,
        key: &ArgumentKey,
        child: ArgumentValidationError,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
    ) -> Self {
        let errors = child
            .errors
            .iter()
            .map(|message| format!("Invalid {element} at position {key}: {message}"))
            .collect();

        Self {
            transformer: transformer.into(),
            kind: ArgumentErrorKind::Structural,
            errors,
            arguments: arguments.cloned(),
            payload: payload.clone(),
            source: Some(ArgumentErrorCause::Nested(Box::new(child))),
        }
    }

    /// All messages joined into a single line
    pub fn message(&self) -> String {
        self.errors.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_message_names_index() {
        let err = ArgumentValidationError::from_coercion(
            "Hash",
            &ArgumentKey::Index(0),
            "Algorithm",
            CoercionError::Missing,
            None,
            &json!("payload"),
        );

        assert_eq!(err.kind, ArgumentErrorKind::Missing);
        assert_eq!(err.errors, vec!["Algorithm argument (0) is required".to_string()]);
        assert_eq!(err.payload, json!("payload"));
        assert!(err.to_string().starts_with("Invalid argument for transformation Hash"));
    }

    #[test]
    fn test_unrecognised_keeps_source() {
        let source = UnknownVariantError {
            kind: "Algorithm",
            value: "sha9-999".to_string(),
            expected: vec!["md5", "sha1"],
        };
        let err = ArgumentValidationError::from_coercion(
            "Hash",
            &ArgumentKey::Index(0),
            "Algorithm",
            CoercionError::Unrecognised {
                value: "\"sha9-999\"".to_string(),
                source: source.clone(),
            },
            None,
            &Value::Null,
        );

        assert_eq!(err.kind, ArgumentErrorKind::Unrecognised);
        assert_eq!(err.source, Some(ArgumentErrorCause::UnknownVariant(source)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_nested_prefixes_position() {
        let child = ArgumentValidationError::new(
            "FilterCompare",
            ArgumentErrorKind::Missing,
            "Comparator argument (1) is required",
            None,
            &Value::Null,
        );
        let err = ArgumentValidationError::nested(
            "FilterCompare",
            "filter comparison",
            &ArgumentKey::Index(3),
            child,
            None,
            &Value::Null,
        );

        assert_eq!(err.kind, ArgumentErrorKind::Structural);
        assert_eq!(
            err.message(),
            "Invalid filter comparison at position 3: Comparator argument (1) is required"
        );
    }

    #[test]
    fn test_crate_error_exposes_argument_error() {
        let err: Error = ArgumentValidationError::new(
            "Trim",
            ArgumentErrorKind::InvalidType,
            "bad",
            None,
            &Value::Null,
        )
        .into();

        let staged = Error::Stage {
            stage: 2,
            transformer: "Trim".to_string(),
            source: Box::new(err),
        };
        assert_eq!(staged.as_argument_error().map(|e| e.kind), Some(ArgumentErrorKind::InvalidType));
    }
}
