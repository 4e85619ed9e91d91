//! Transformers
//!
//! A transformer applies one named operation to the data it receives. Its
//! configuration arrives as an [`ArgumentIterator`] and is resolved through
//! the operation's argument provider, with the data itself acting as the
//! extraction payload. Failures split into argument problems
//! ([`Error::InvalidArguments`]) and data problems
//! ([`Error::InvalidInputData`]).
//!
//! # Module Organization
//!
//! - [`string`] - case, escaping, hashing, splitting, trimming, tags, dates
//! - [`array`] - chunking, de-duplication, sorting, filtering, property mapping
//! - [`number`] - arithmetic, formatting, rounding
//! - [`property`] - setting and removing nested properties
//! - [`value_map`] - source-to-converted value lookup
//! - [`compare`] - loose comparison shared by the filtering transformers
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod compare;
pub mod number;
pub mod property;
pub mod string;
pub mod value_map;

pub use array::{
    ChunkTransformer, FilterCompareTransformer, MapPropertyTransformer, SortTransformer, UniqueTransformer,
};
pub use number::{CalcTransformer, FormatNumberTransformer, RoundTransformer};
pub use property::{SetPropertyValueTransformer, UnsetPropertyTransformer};
pub use string::{
    ChangeCaseTransformer, EscapeHtmlTransformer, FormatDateTransformer, HashTransformer, JoinTransformer,
    MaxWordsTransformer, SplitTransformer, StripTagsTransformer, TrimTransformer,
};
pub use value_map::ValueMapTransformer;

use crate::argument::ArgumentIterator;
use crate::error::{Error, Result};
use crate::extraction::ExtractionContext;
use serde_json::{Number, Value};
use std::fmt;

/// A named operation over a JSON value
pub trait Transformer: Send + Sync + fmt::Debug {
    /// Name used to look the transformer up in a registry
    fn name(&self) -> &'static str;

    /// Apply the operation to `data`
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value>;
}

/// JSON type name used in input data errors
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn expect_string<'a>(
    transformer: &str,
    data: &'a Value,
    arguments: Option<&ArgumentIterator>,
) -> Result<&'a str> {
    data.as_str().ok_or_else(|| {
        Error::invalid_input_data(
            transformer,
            format!("Expected a string, received {}", value_type_name(data)),
            arguments,
            data,
        )
    })
}

/// Strings, numbers and booleans, cast to string
pub(crate) fn expect_scalar_string(
    transformer: &str,
    data: &Value,
    arguments: Option<&ArgumentIterator>,
) -> Result<String> {
    match data {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(crate::coercion::scalar_to_string(data)),
        other => Err(Error::invalid_input_data(
            transformer,
            format!("Expected a scalar value, received {}", value_type_name(other)),
            arguments,
            data,
        )),
    }
}

/// Numbers, and strings holding a number
pub(crate) fn expect_number(
    transformer: &str,
    data: &Value,
    arguments: Option<&ArgumentIterator>,
) -> Result<Number> {
    let number = match data {
        Value::Number(number) => Some(number.clone()),
        Value::String(text) => crate::coercion::parse_number(text.trim()),
        _ => None,
    };

    number.ok_or_else(|| {
        Error::invalid_input_data(
            transformer,
            format!("Expected a numeric value, received {}", compare::describe(data)),
            arguments,
            data,
        )
    })
}

/// Key/value entries of an array or object
pub(crate) fn expect_entries(
    transformer: &str,
    data: &Value,
    arguments: Option<&ArgumentIterator>,
) -> Result<Vec<(Value, Value)>> {
    match data {
        Value::Array(items) => Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| (Value::from(index), item.clone()))
            .collect()),
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, item)| (Value::String(key.clone()), item.clone()))
            .collect()),
        other => Err(Error::invalid_input_data(
            transformer,
            format!("Expected an array or object, received {}", value_type_name(other)),
            arguments,
            data,
        )),
    }
}

/// Rebuild a container from entries, keyed by their original keys
pub(crate) fn keyed_container(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (crate::coercion::scalar_to_string(&key), value))
            .collect(),
    )
}

/// Rebuild a container from entries, keeping keys only when the source was an object
pub(crate) fn rebuild_like(source: &Value, entries: Vec<(Value, Value)>) -> Value {
    if source.is_object() {
        keyed_container(entries)
    } else {
        Value::Array(entries.into_iter().map(|(_, value)| value).collect())
    }
}
