//! ValueMap transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::compare::equals;
use super::Transformer;
use crate::argument::{ArgumentIterator, ValueMapItem};
use crate::error::Result;
use crate::extraction::ExtractionContext;
use crate::provider::ValueMapArgumentProvider;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct ValueMapTransformer {
    arguments: ValueMapArgumentProvider,
}

impl ValueMapTransformer {
    pub fn new(arguments: ValueMapArgumentProvider) -> Self {
        Self { arguments }
    }
}

fn lowercase(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.to_lowercase()),
        other => other.clone(),
    }
}

fn item_matches(item: &ValueMapItem, data: &Value) -> bool {
    if item.case_sensitive {
        equals(&item.source_value, data, item.strict)
    } else {
        equals(&lowercase(&item.source_value), &lowercase(data), item.strict)
    }
}

impl Transformer for ValueMapTransformer {
    fn name(&self) -> &'static str {
        ValueMapArgumentProvider::TRANSFORMER
    }

    /// Converted value of the first item whose source matches the data
    ///
    /// Data matching no item, and container data, is returned unchanged.
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let items = self.arguments.get_value_map(arguments, data, context)?;
        if data.is_array() || data.is_object() {
            return Ok(data.clone());
        }

        Ok(items
            .into_iter()
            .find(|item| item_matches(item, data))
            .map_or_else(|| data.clone(), |item| item.converted_value))
    }
}
