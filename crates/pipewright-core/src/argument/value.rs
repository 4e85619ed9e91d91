//! Raw argument values
//!
//! An argument value is either a literal, a deferred extraction to be resolved
//! against the payload, or one of the structured forms (nested arguments, an
//! enum instance, a pre-built filter comparison).
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::compound::FilterComparison;
use super::iterator::ArgumentIterator;
use crate::enums::ArgumentEnum;
use crate::extraction::Extraction;
use serde_json::Value;

/// An enum member passed directly as an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumLiteral {
    /// Name of the enumeration the member belongs to
    pub kind: &'static str,
    /// Declared value of the member
    pub value: &'static str,
}

impl EnumLiteral {
    pub fn of<E: ArgumentEnum>(member: E) -> Self {
        Self {
            kind: E::KIND,
            value: member.as_str(),
        }
    }
}

/// Value held by an argument before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// Literal JSON value, used as-is
    Literal(Value),
    /// Deferred lookup against the extraction payload or context
    Extraction(Extraction),
    /// Nested argument container
    Arguments(ArgumentIterator),
    /// Already-typed enum member
    Enum(EnumLiteral),
    /// Already-decoded filter comparison
    FilterComparison(Box<FilterComparison>),
}

impl ArgumentValue {
    /// The "not supplied" value
    pub fn null() -> Self {
        ArgumentValue::Literal(Value::Null)
    }

    /// Interpret a raw configuration value
    ///
    /// Strings starting with `$` become deferred extractions (`\$` escapes a
    /// literal dollar), arrays and objects become nested argument containers.
    pub fn from_raw(value: &Value) -> Self {
        match value {
            Value::String(raw) => match Extraction::parse_marker(raw) {
                Some(extraction) => ArgumentValue::Extraction(extraction),
                None => ArgumentValue::Literal(Value::String(Extraction::unescape(raw).into_owned())),
            },
            Value::Array(_) | Value::Object(_) => {
                ArgumentValue::Arguments(ArgumentIterator::from_nested(value))
            }
            other => ArgumentValue::Literal(other.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Literal(Value::Null))
    }

    pub fn is_extraction(&self) -> bool {
        matches!(self, ArgumentValue::Extraction(_))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            ArgumentValue::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_literal().and_then(Value::as_str)
    }

    pub fn as_arguments(&self) -> Option<&ArgumentIterator> {
        match self {
            ArgumentValue::Arguments(arguments) => Some(arguments),
            _ => None,
        }
    }

    /// Whether the value counts as empty under "falsy" semantics
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty containers are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ArgumentValue::Literal(value) => match value {
                Value::Null => true,
                Value::Bool(flag) => !flag,
                Value::Number(number) => number.as_f64().map_or(false, |n| n == 0.0),
                Value::String(text) => text.is_empty() || text == "0",
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
            },
            ArgumentValue::Arguments(arguments) => arguments.is_empty(),
            ArgumentValue::Extraction(_)
            | ArgumentValue::Enum(_)
            | ArgumentValue::FilterComparison(_) => false,
        }
    }

    /// Whether the value is a bool, number or string literal
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ArgumentValue::Literal(Value::Bool(_) | Value::Number(_) | Value::String(_))
        )
    }

    /// Render as plain JSON data
    ///
    /// Nested containers render recursively, extractions render as their
    /// marker string and enum members as their declared value.
    pub fn to_value(&self) -> Value {
        match self {
            ArgumentValue::Literal(value) => value.clone(),
            ArgumentValue::Extraction(extraction) => Value::String(extraction.to_marker()),
            ArgumentValue::Arguments(arguments) => arguments.to_value(),
            ArgumentValue::Enum(literal) => Value::String(literal.value.to_string()),
            ArgumentValue::FilterComparison(comparison) => comparison.to_value(),
        }
    }

    /// Render as configuration, escaping literal strings that look like markers
    pub fn to_config_value(&self) -> Value {
        match self {
            ArgumentValue::Literal(Value::String(text)) => Value::String(Extraction::escape(text).into_owned()),
            ArgumentValue::Arguments(arguments) => arguments.to_config_value(),
            other => other.to_value(),
        }
    }

    /// Best-effort type name for error messages
    pub fn type_name(&self) -> String {
        match self {
            ArgumentValue::Literal(value) => match value {
                Value::Null => "null".to_string(),
                Value::Bool(_) => "boolean".to_string(),
                Value::Number(number) if number.is_f64() => "float".to_string(),
                Value::Number(_) => "integer".to_string(),
                Value::String(_) => "string".to_string(),
                Value::Array(_) => "array".to_string(),
                Value::Object(_) => "object".to_string(),
            },
            ArgumentValue::Extraction(_) => "extraction".to_string(),
            ArgumentValue::Arguments(arguments) if arguments.is_list() => "array".to_string(),
            ArgumentValue::Arguments(_) => "object".to_string(),
            ArgumentValue::Enum(literal) => literal.kind.to_string(),
            ArgumentValue::FilterComparison(_) => "FilterComparison".to_string(),
        }
    }

    /// The value itself when scalar, otherwise its type name
    pub fn describe(&self) -> String {
        match self {
            ArgumentValue::Literal(value @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
                value.to_string()
            }
            ArgumentValue::Enum(literal) => format!("{}::{}", literal.kind, literal.value),
            other => other.type_name(),
        }
    }
}

impl Default for ArgumentValue {
    fn default() -> Self {
        ArgumentValue::null()
    }
}

impl From<Value> for ArgumentValue {
    fn from(value: Value) -> Self {
        ArgumentValue::Literal(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Literal(Value::from(value))
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Literal(Value::from(value))
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Literal(Value::from(value))
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        ArgumentValue::Literal(Value::from(value))
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Literal(Value::from(value))
    }
}

impl From<Extraction> for ArgumentValue {
    fn from(value: Extraction) -> Self {
        ArgumentValue::Extraction(value)
    }
}

impl From<ArgumentIterator> for ArgumentValue {
    fn from(value: ArgumentIterator) -> Self {
        ArgumentValue::Arguments(value)
    }
}

impl From<FilterComparison> for ArgumentValue {
    fn from(value: FilterComparison) -> Self {
        ArgumentValue::FilterComparison(Box::new(value))
    }
}

impl From<EnumLiteral> for ArgumentValue {
    fn from(value: EnumLiteral) -> Self {
        ArgumentValue::Enum(value)
    }
}
