//! Property transformers
//!
//! A property key is a path split on the property separator. Path segments
//! address object keys, or array positions when the container is an array.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{value_type_name, Transformer};
use crate::argument::ArgumentIterator;
use crate::error::{Error, Result};
use crate::extraction::ExtractionContext;
use crate::provider::{SetPropertyValueArgumentProvider, UnsetPropertyArgumentProvider};
use serde_json::{Map, Value};

fn empty_container(associative: bool) -> Value {
    if associative {
        Value::Object(Map::new())
    } else {
        Value::Array(Vec::new())
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn set_path(target: &mut Value, segments: &[&str], value: Value, associative: bool) -> std::result::Result<(), String> {
    let Some((segment, rest)) = segments.split_first() else {
        *target = value;
        return Ok(());
    };

    if target.is_null() {
        *target = empty_container(associative);
    }

    let slot = match target {
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        Value::Array(items) => {
            let index = segment
                .parse::<usize>()
                .map_err(|_| format!("Cannot set key \"{segment}\" on an array"))?;
            if index > items.len() {
                return Err(format!("Index {index} is out of bounds for an array of {} elements", items.len()));
            }
            if index == items.len() {
                items.push(Value::Null);
            }
            &mut items[index]
        }
        other => return Err(format!("Cannot set \"{segment}\" on {}", value_type_name(other))),
    };

    if !rest.is_empty() && !is_container(slot) {
        *slot = empty_container(associative);
    }
    set_path(slot, rest, value, associative)
}

#[derive(Debug, Clone, Default)]
pub struct SetPropertyValueTransformer {
    arguments: SetPropertyValueArgumentProvider,
}

impl SetPropertyValueTransformer {
    pub fn new(arguments: SetPropertyValueArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for SetPropertyValueTransformer {
    fn name(&self) -> &'static str {
        SetPropertyValueArgumentProvider::TRANSFORMER
    }

    /// Write a value at a property path, creating missing intermediate containers
    ///
    /// Intermediates are created as objects when `associative` is set and as
    /// arrays otherwise. Scalars found along the path are replaced.
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let property_key = self.arguments.get_property_key_argument_value(arguments, data, context)?;
        let property_value = self
            .arguments
            .get_property_value_argument_value(arguments, data, context);
        let separator = self
            .arguments
            .get_property_separator_argument_value(arguments, data, context)?;
        let associative = self.arguments.get_associative_argument_value(arguments, data, context)?;

        if !data.is_null() && !is_container(data) {
            return Err(Error::invalid_input_data(
                self.name(),
                format!("Expected an array or object, received {}", value_type_name(data)),
                arguments,
                data,
            ));
        }

        let segments: Vec<&str> = property_key.split(separator.as_str()).collect();
        let mut result = data.clone();
        set_path(&mut result, &segments, property_value, associative)
            .map_err(|message| Error::invalid_input_data(self.name(), message, arguments, data))?;
        Ok(result)
    }
}

fn unset_path(target: &mut Value, segments: &[&str]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return false;
    };

    match target {
        Value::Object(map) if rest.is_empty() => {
            if !map.contains_key(*segment) {
                return false;
            }
            *map = std::mem::take(map).into_iter().filter(|(key, _)| key != *segment).collect();
            true
        }
        Value::Object(map) => map.get_mut(*segment).is_some_and(|child| unset_path(child, rest)),
        Value::Array(items) => match segment.parse::<usize>() {
            Ok(index) if index < items.len() && rest.is_empty() => {
                items.remove(index);
                true
            }
            Ok(index) if index < items.len() => unset_path(&mut items[index], rest),
            _ => false,
        },
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnsetPropertyTransformer {
    arguments: UnsetPropertyArgumentProvider,
}

impl UnsetPropertyTransformer {
    pub fn new(arguments: UnsetPropertyArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for UnsetPropertyTransformer {
    fn name(&self) -> &'static str {
        UnsetPropertyArgumentProvider::TRANSFORMER
    }

    /// Remove the property at a path; data without that path is returned unchanged
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let property_key = self.arguments.get_property_key_argument_value(arguments, data, context)?;
        let separator = self
            .arguments
            .get_property_separator_argument_value(arguments, data, context)?;

        let segments: Vec<&str> = property_key.split(separator.as_str()).collect();
        let mut result = data.clone();
        if !unset_path(&mut result, &segments) {
            log::trace!("Property {property_key} not present, nothing to unset");
        }
        Ok(result)
    }
}
