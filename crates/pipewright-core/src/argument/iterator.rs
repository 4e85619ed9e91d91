//! Ordered argument container
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::key::ArgumentKey;
use super::value::ArgumentValue;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single keyed argument
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    key: ArgumentKey,
    value: ArgumentValue,
}

impl Argument {
    pub fn new(key: impl Into<ArgumentKey>, value: impl Into<ArgumentValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &ArgumentKey {
        &self.key
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    pub fn into_value(self) -> ArgumentValue {
        self.value
    }
}

/// Ordered collection of arguments, unique by key
///
/// Iteration follows insertion order. Inserting an existing key replaces the
/// value in place without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentIterator {
    arguments: IndexMap<ArgumentKey, Argument>,
}

impl ArgumentIterator {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container from raw configuration
    ///
    /// Arrays produce positional keys, objects produce named keys. Nested
    /// arrays and objects become nested containers and `$` strings become
    /// deferred extractions.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(_) | Value::Object(_) => Ok(Self::from_nested(value)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::Configuration {
                message: format!("Arguments must be an array or object, received {other}"),
                context: Some("ArgumentIterator".to_string()),
            }),
        }
    }

    pub(crate) fn from_nested(value: &Value) -> Self {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Argument::new(index, ArgumentValue::from_raw(item)))
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| Argument::new(key.as_str(), ArgumentValue::from_raw(item)))
                .collect(),
            _ => Self::new(),
        }
    }

    /// Wrap already-resolved data as a container of literal members
    ///
    /// Unlike [`from_value`](Self::from_value), strings are never read as
    /// extraction markers and nested containers stay literal values.
    pub fn from_resolved(value: &Value) -> Self {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Argument::new(index, ArgumentValue::Literal(item.clone())))
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| Argument::new(key.as_str(), ArgumentValue::Literal(item.clone())))
                .collect(),
            _ => Self::new(),
        }
    }

    /// Build a positional container from literal values
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgumentValue>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Argument::new(index, value))
            .collect()
    }

    /// Insert or replace an argument
    pub fn insert(&mut self, key: impl Into<ArgumentKey>, value: impl Into<ArgumentValue>) {
        let argument = Argument::new(key, value);
        self.arguments.insert(argument.key.clone(), argument);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<ArgumentKey>, value: impl Into<ArgumentValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append at the next free position
    pub fn push(&mut self, value: impl Into<ArgumentValue>) {
        let next = self
            .arguments
            .keys()
            .filter_map(ArgumentKey::as_index)
            .max()
            .map_or(0, |max| max + 1);
        self.insert(next, value);
    }

    pub fn get(&self, key: &ArgumentKey) -> Option<&Argument> {
        self.arguments.get(key)
    }

    pub fn get_value(&self, key: &ArgumentKey) -> Option<&ArgumentValue> {
        self.get(key).map(Argument::value)
    }

    pub fn contains_key(&self, key: &ArgumentKey) -> bool {
        self.arguments.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArgumentKey> {
        self.arguments.keys()
    }

    /// Whether keys are exactly the positions `0..len` in order
    pub fn is_list(&self) -> bool {
        self.arguments
            .keys()
            .enumerate()
            .all(|(position, key)| key.as_index() == Some(position))
    }

    /// Key/value pairs in iteration order
    pub fn to_array(&self) -> IndexMap<ArgumentKey, ArgumentValue> {
        self.arguments
            .iter()
            .map(|(key, argument)| (key.clone(), argument.value.clone()))
            .collect()
    }

    /// Render as plain JSON data
    pub fn to_value(&self) -> Value {
        self.render(ArgumentValue::to_value)
    }

    /// Render as configuration that [`ArgumentIterator::from_value`] reads back
    pub fn to_config_value(&self) -> Value {
        self.render(ArgumentValue::to_config_value)
    }

    fn render(&self, render_value: fn(&ArgumentValue) -> Value) -> Value {
        if self.is_list() {
            Value::Array(self.iter().map(|argument| render_value(&argument.value)).collect())
        } else {
            let map: Map<String, Value> = self
                .iter()
                .map(|argument| (argument.key.to_string(), render_value(&argument.value)))
                .collect();
            Value::Object(map)
        }
    }
}

impl FromIterator<Argument> for ArgumentIterator {
    fn from_iter<T: IntoIterator<Item = Argument>>(iter: T) -> Self {
        let mut arguments = ArgumentIterator::new();
        for argument in iter {
            arguments.arguments.insert(argument.key.clone(), argument);
        }
        arguments
    }
}

impl<'a> IntoIterator for &'a ArgumentIterator {
    type Item = &'a Argument;
    type IntoIter = indexmap::map::Values<'a, ArgumentKey, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.values()
    }
}

impl TryFrom<Value> for ArgumentIterator {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        ArgumentIterator::from_value(&value)
    }
}

impl Serialize for ArgumentIterator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_config_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArgumentIterator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ArgumentIterator::from_value(&value).map_err(serde::de::Error::custom)
    }
}
