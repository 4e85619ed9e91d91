//! Value coercion rules
//!
//! Pure functions turning a resolved (and already defaulted) argument value
//! into the typed parameter a transformer consumes. Each rule fails with a
//! [`CoercionError`] that distinguishes a missing value, an unrecognised enum
//! string, a value of the wrong type and a value out of range. Providers turn
//! these into [`ArgumentValidationError`](crate::error::ArgumentValidationError)s.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use crate::argument::{ArgumentIterator, ArgumentValue};
use crate::enums::{ArgumentEnum, UnknownVariantError};
use crate::error::ArgumentErrorKind;
use serde_json::{Number, Value};
use std::num::IntErrorKind;
use thiserror::Error;

/// Why a value could not be coerced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("value is required")]
    Missing,

    #[error("unrecognised value {value}")]
    Unrecognised {
        value: String,
        #[source]
        source: UnknownVariantError,
    },

    #[error("expected {expected}, received {received}")]
    InvalidType {
        expected: &'static str,
        received: String,
    },

    #[error("must be {expected}, received {received}")]
    OutOfRange {
        expected: &'static str,
        received: String,
    },

    #[error("element {element} must be {expected}, received {received}")]
    InvalidElement {
        element: String,
        expected: &'static str,
        received: String,
    },
}

impl CoercionError {
    pub fn kind(&self) -> ArgumentErrorKind {
        match self {
            CoercionError::Missing => ArgumentErrorKind::Missing,
            CoercionError::Unrecognised { .. } => ArgumentErrorKind::Unrecognised,
            CoercionError::InvalidType { .. } | CoercionError::InvalidElement { .. } => {
                ArgumentErrorKind::InvalidType
            }
            CoercionError::OutOfRange { .. } => ArgumentErrorKind::OutOfRange,
        }
    }

    fn invalid_type(expected: &'static str, value: &ArgumentValue) -> Self {
        CoercionError::InvalidType {
            expected,
            received: value.describe(),
        }
    }

    fn out_of_range(expected: &'static str, value: &ArgumentValue) -> Self {
        CoercionError::OutOfRange {
            expected,
            received: value.describe(),
        }
    }
}

/// How strings are accepted by the integer rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerStrings {
    /// Any string parsing as a signed integer
    Numeric,
    /// Only non-empty strings made of ASCII digits
    DigitsOnly,
}

/// Accept an enum member of the right kind, or a string naming one
pub fn enum_member<E: ArgumentEnum>(value: &ArgumentValue) -> Result<E, CoercionError> {
    match value {
        ArgumentValue::Enum(literal) if literal.kind == E::KIND => {
            E::parse(literal.value).map_err(|source| CoercionError::Unrecognised {
                value: value.describe(),
                source,
            })
        }
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::String(text)) if text.is_empty() => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::String(text)) => {
            E::parse(text).map_err(|source| CoercionError::Unrecognised {
                value: value.describe(),
                source,
            })
        }
        other => Err(CoercionError::invalid_type("a string or enum member", other)),
    }
}

/// Accept a strictly positive integer
pub fn positive_integer(value: &ArgumentValue, strings: IntegerStrings) -> Result<u64, CoercionError> {
    const EXPECTED: &str = "a positive integer";

    let number = integer(value, strings, EXPECTED)?;
    if number <= 0 {
        return Err(CoercionError::out_of_range(EXPECTED, value));
    }
    Ok(number as u64)
}

/// Accept an integer of zero or more
pub fn non_negative_integer(value: &ArgumentValue, strings: IntegerStrings) -> Result<u64, CoercionError> {
    const EXPECTED: &str = "a non-negative integer";

    let number = integer(value, strings, EXPECTED)?;
    if number < 0 {
        return Err(CoercionError::out_of_range(EXPECTED, value));
    }
    Ok(number as u64)
}

/// Whole numbers beyond the `i64` range are out of range, whether written as numbers or strings
fn integer(value: &ArgumentValue, strings: IntegerStrings, expected: &'static str) -> Result<i64, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            if number.is_u64() {
                return Err(CoercionError::out_of_range(expected, value));
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.is_finite() => {
                    if float >= i64::MIN as f64 && float < i64::MAX as f64 {
                        Ok(float as i64)
                    } else {
                        Err(CoercionError::out_of_range(expected, value))
                    }
                }
                Some(float) if float <= 0.0 => Err(CoercionError::out_of_range(expected, value)),
                _ => Err(CoercionError::invalid_type(expected, value)),
            }
        }
        ArgumentValue::Literal(Value::String(text)) => {
            if strings == IntegerStrings::DigitsOnly && !is_digits(text) {
                return Err(CoercionError::invalid_type(expected, value));
            }
            text.parse::<i64>().map_err(|error| match error.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoercionError::out_of_range(expected, value),
                _ => CoercionError::invalid_type(expected, value),
            })
        }
        other => Err(CoercionError::invalid_type(expected, other)),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Accept a number or a numeric string
pub fn numeric(value: &ArgumentValue) -> Result<Number, CoercionError> {
    const EXPECTED: &str = "a number";

    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::Number(number)) => Ok(number.clone()),
        ArgumentValue::Literal(Value::String(text)) => parse_number(text.trim())
            .ok_or_else(|| CoercionError::invalid_type(EXPECTED, value)),
        other => Err(CoercionError::invalid_type(EXPECTED, other)),
    }
}

/// Parse a numeric string into an integer when exact, otherwise a float
pub fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Accept a string of at least one character
pub fn non_empty_string(value: &ArgumentValue) -> Result<String, CoercionError> {
    const EXPECTED: &str = "a non-empty string";

    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::String(text)) if text.is_empty() => {
            Err(CoercionError::out_of_range(EXPECTED, value))
        }
        ArgumentValue::Literal(Value::String(text)) => Ok(text.clone()),
        other => Err(CoercionError::invalid_type(EXPECTED, other)),
    }
}

/// Accept a string, including the empty string
pub fn string(value: &ArgumentValue) -> Result<String, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::String(text)) => Ok(text.clone()),
        other => Err(CoercionError::invalid_type("a string", other)),
    }
}

/// Accept an actual boolean; no truthiness
pub fn boolean(value: &ArgumentValue) -> Result<bool, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::Bool(flag)) => Ok(*flag),
        other => Err(CoercionError::invalid_type("a boolean", other)),
    }
}

/// Accept a string or null
pub fn nullable_string(value: &ArgumentValue) -> Result<Option<String>, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Ok(None),
        ArgumentValue::Literal(Value::String(text)) => Ok(Some(text.clone())),
        other => Err(CoercionError::invalid_type("a string or null", other)),
    }
}

/// Accept any scalar or null, casting scalars to string
pub fn nullable_scalar_string(value: &ArgumentValue) -> Result<Option<String>, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Ok(None),
        other => scalar_string(other).map(Some),
    }
}

/// Accept any scalar, cast to string
///
/// Booleans cast to `"1"` and `""`, numbers to their shortest decimal form.
pub fn scalar_string(value: &ArgumentValue) -> Result<String, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
            Ok(scalar_to_string(scalar))
        }
        other => Err(CoercionError::invalid_type("a scalar value", other)),
    }
}

/// Cast a scalar JSON value to string; containers render as JSON
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.is_finite() => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Accept a bool, number or string as-is
pub fn scalar(value: &ArgumentValue) -> Result<Value, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
            Ok(scalar.clone())
        }
        other => Err(CoercionError::invalid_type("a scalar value", other)),
    }
}

/// Accept a string or integer key, as string
pub fn string_or_integer(value: &ArgumentValue) -> Result<String, CoercionError> {
    const EXPECTED: &str = "a non-empty string or integer";

    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Literal(Value::String(text)) if text.is_empty() => {
            Err(CoercionError::out_of_range(EXPECTED, value))
        }
        ArgumentValue::Literal(Value::String(text)) => Ok(text.clone()),
        ArgumentValue::Literal(Value::Number(number)) if number.is_i64() || number.is_u64() => {
            Ok(number.to_string())
        }
        other => Err(CoercionError::invalid_type(EXPECTED, other)),
    }
}

/// Accept null or a list whose every element is a string; elements are trimmed
pub fn string_array(value: &ArgumentValue) -> Result<Vec<String>, CoercionError> {
    const EXPECTED: &str = "a string";

    match value {
        ArgumentValue::Literal(Value::Null) => Ok(Vec::new()),
        ArgumentValue::Literal(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(text) => Ok(text.trim().to_string()),
                other => Err(CoercionError::InvalidElement {
                    element: index.to_string(),
                    expected: EXPECTED,
                    received: ArgumentValue::Literal(other.clone()).describe(),
                }),
            })
            .collect(),
        ArgumentValue::Arguments(arguments) => arguments
            .iter()
            .map(|argument| match argument.value() {
                ArgumentValue::Literal(Value::String(text)) => Ok(text.trim().to_string()),
                other => Err(CoercionError::InvalidElement {
                    element: argument.key().to_string(),
                    expected: EXPECTED,
                    received: other.describe(),
                }),
            })
            .collect(),
        other => Err(CoercionError::invalid_type("an array of strings", other)),
    }
}

/// Accept an array, object or nested arguments as a container
///
/// Literal arrays and objects are resolved data, so their members stay literal.
pub fn container(value: &ArgumentValue) -> Result<ArgumentIterator, CoercionError> {
    match value {
        ArgumentValue::Literal(Value::Null) => Err(CoercionError::Missing),
        ArgumentValue::Arguments(arguments) => Ok(arguments.clone()),
        ArgumentValue::Literal(raw @ (Value::Array(_) | Value::Object(_))) => {
            Ok(ArgumentIterator::from_resolved(raw))
        }
        other => Err(CoercionError::invalid_type("an array or object", other)),
    }
}
