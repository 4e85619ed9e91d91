//! Array transformers
//!
//! Every transformer here accepts an array or an object. Arrays are rebuilt
//! as arrays, objects keep their keys unless noted otherwise.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::compare::{equals, evaluate, sort_order};
use super::{expect_entries, keyed_container, rebuild_like, Transformer};
use crate::argument::{ArgumentIterator, ArgumentValue, FilterComparison};
use crate::coercion::scalar_to_string;
use crate::enums::SortDirection;
use crate::error::{Error, Result};
use crate::extraction::{Extraction, ExtractionContext};
use crate::provider::{
    ArgumentProvider, ChunkArgumentProvider, DefaultArgumentProvider, FilterCompareArgumentProvider,
    MapPropertyArgumentProvider, SortArgumentProvider, UniqueArgumentProvider,
};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ChunkTransformer {
    arguments: ChunkArgumentProvider,
}

impl ChunkTransformer {
    pub fn new(arguments: ChunkArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for ChunkTransformer {
    fn name(&self) -> &'static str {
        ChunkArgumentProvider::TRANSFORMER
    }

    /// Split into chunks of `length`; with `preserveKeys` each chunk keeps the original keys
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let length = self.arguments.get_length_argument_value(arguments, data, context)?;
        let preserve_keys = self.arguments.get_preserve_keys_argument_value(arguments, data, context)?;
        let entries = expect_entries(self.name(), data, arguments)?;

        let chunks = entries
            .chunks(length)
            .map(|chunk| {
                if preserve_keys {
                    keyed_container(chunk.iter().cloned())
                } else {
                    Value::Array(chunk.iter().map(|(_, value)| value.clone()).collect())
                }
            })
            .collect();
        Ok(Value::Array(chunks))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UniqueTransformer {
    arguments: UniqueArgumentProvider,
}

impl UniqueTransformer {
    pub fn new(arguments: UniqueArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for UniqueTransformer {
    fn name(&self) -> &'static str {
        UniqueArgumentProvider::TRANSFORMER
    }

    /// Keep the first occurrence of every value
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let strict = self.arguments.get_strict_argument_value(arguments, data, context)?;
        let retain_keys = self.arguments.get_retain_keys_argument_value(arguments, data, context)?;
        let entries = expect_entries(self.name(), data, arguments)?;

        let mut kept: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if !kept.iter().any(|(_, seen)| equals(seen, &value, strict)) {
                kept.push((key, value));
            }
        }

        if retain_keys {
            Ok(keyed_container(kept))
        } else {
            Ok(Value::Array(kept.into_iter().map(|(_, value)| value).collect()))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortTransformer {
    arguments: SortArgumentProvider,
}

impl SortTransformer {
    pub fn new(arguments: SortArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for SortTransformer {
    fn name(&self) -> &'static str {
        SortArgumentProvider::TRANSFORMER
    }

    /// Stable sort by value; mixed types order null, bool, number, string, array, object
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let direction = self.arguments.get_direction_argument_value(arguments, data, context)?;
        let mut entries = expect_entries(self.name(), data, arguments)?;

        match direction {
            SortDirection::Asc => entries.sort_by(|(_, a), (_, b)| sort_order(a, b)),
            SortDirection::Desc => entries.sort_by(|(_, a), (_, b)| sort_order(b, a)),
        }
        Ok(rebuild_like(data, entries))
    }
}

/// Keeps the elements for which at least one comparison holds
///
/// Source and compare values that are deferred extractions resolve against
/// each element; an extraction that fails resolves to `null`.
#[derive(Debug, Clone)]
pub struct FilterCompareTransformer {
    arguments: FilterCompareArgumentProvider,
    argument_provider: Arc<dyn ArgumentProvider>,
}

impl FilterCompareTransformer {
    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            arguments: FilterCompareArgumentProvider::new(argument_provider.clone()),
            argument_provider,
        }
    }

    pub fn with_arguments(mut self, arguments: FilterCompareArgumentProvider) -> Self {
        self.arguments = arguments;
        self
    }

    fn resolve(&self, value: &ArgumentValue, element: &Value, context: Option<&ExtractionContext>) -> Value {
        match self.argument_provider.expand(value.clone(), element, context) {
            Ok(resolved) => resolved.to_value(),
            Err(error) => {
                log::debug!("Comparison operand resolved to null: {error}");
                Value::Null
            }
        }
    }

    fn matches(&self, comparison: &FilterComparison, element: &Value, context: Option<&ExtractionContext>) -> bool {
        let source = self.resolve(&comparison.source_value, element, context);
        let compare = self.resolve(&comparison.compare_value, element, context);
        evaluate(comparison.comparator, &source, &compare, comparison.strict)
    }
}

impl Default for FilterCompareTransformer {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}

impl Transformer for FilterCompareTransformer {
    fn name(&self) -> &'static str {
        FilterCompareArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let comparisons = self.arguments.get_filter_comparisons(arguments, data, context)?;
        let entries = expect_entries(self.name(), data, arguments)?;
        if comparisons.is_empty() {
            return Ok(data.clone());
        }

        let kept = entries
            .into_iter()
            .filter(|(_, element)| {
                comparisons
                    .iter()
                    .any(|comparison| self.matches(comparison, element, context))
            })
            .collect();
        Ok(rebuild_like(data, kept))
    }
}

/// Replaces every element with the value found at an accessor inside it
#[derive(Debug, Clone)]
pub struct MapPropertyTransformer {
    arguments: MapPropertyArgumentProvider,
    argument_provider: Arc<dyn ArgumentProvider>,
}

impl MapPropertyTransformer {
    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            arguments: MapPropertyArgumentProvider::new(argument_provider.clone()),
            argument_provider,
        }
    }

    pub fn with_arguments(mut self, arguments: MapPropertyArgumentProvider) -> Self {
        self.arguments = arguments;
        self
    }
}

impl Default for MapPropertyTransformer {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}

impl Transformer for MapPropertyTransformer {
    fn name(&self) -> &'static str {
        MapPropertyArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let accessor = self.arguments.get_accessor_argument_value(arguments, data, context)?;
        let return_null = self
            .arguments
            .get_return_null_on_failed_extraction_argument_value(arguments, data, context)?;
        let entries = expect_entries(self.name(), data, arguments)?;

        let extraction = ArgumentValue::Extraction(Extraction::new(accessor));
        let mapped = entries
            .into_iter()
            .map(|(key, element)| {
                match self.argument_provider.expand(extraction.clone(), &element, context) {
                    Ok(value) => Ok((key, value.to_value())),
                    Err(_) if return_null => Ok((key, Value::Null)),
                    Err(error) => Err(Error::invalid_input_data(
                        self.name(),
                        format!("Element {}: {error}", scalar_to_string(&key)),
                        arguments,
                        data,
                    )),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(rebuild_like(data, mapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(raw: Value) -> ArgumentIterator {
        ArgumentIterator::from_value(&raw).unwrap()
    }

    #[test]
    fn test_chunk() {
        let transformer = ChunkTransformer::default();
        assert_eq!(
            transformer.transform(&json!([1, 2, 3, 4, 5]), Some(&args(json!([2]))), None).unwrap(),
            json!([[1, 2], [3, 4], [5]])
        );
        assert_eq!(
            transformer
                .transform(&json!({"a": 1, "b": 2, "c": 3}), Some(&args(json!(["2", true]))), None)
                .unwrap(),
            json!([{"a": 1, "b": 2}, {"c": 3}])
        );
        assert!(matches!(
            transformer.transform(&json!([1]), Some(&args(json!([0]))), None),
            Err(Error::InvalidArguments(_))
        ));
        assert!(matches!(
            transformer.transform(&json!("abc"), Some(&args(json!([1]))), None),
            Err(Error::InvalidInputData { .. })
        ));
    }

    #[test]
    fn test_unique() {
        let transformer = UniqueTransformer::default();
        let data = json!([1, "1", 2, 1.0, "a", "a"]);
        assert_eq!(transformer.transform(&data, None, None).unwrap(), json!([1, 2, "a"]));
        assert_eq!(
            transformer.transform(&data, Some(&args(json!([true]))), None).unwrap(),
            json!([1, "1", 2, 1.0, "a"])
        );
        assert_eq!(
            transformer.transform(&data, Some(&args(json!([false, true]))), None).unwrap(),
            json!({"0": 1, "2": 2, "4": "a"})
        );
    }

    #[test]
    fn test_sort() {
        let transformer = SortTransformer::default();
        assert_eq!(
            transformer.transform(&json!([3, "10", 1, null]), None, None).unwrap(),
            json!([null, 1, 3, "10"])
        );
        let keys = |value: Value| value.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        let data = json!({"x": "b", "y": "a", "z": "c"});
        assert_eq!(keys(transformer.transform(&data, None, None).unwrap()), ["y", "x", "z"]);
        assert_eq!(
            keys(transformer.transform(&data, Some(&args(json!(["desc"]))), None).unwrap()),
            ["z", "x", "y"]
        );
    }

    #[test]
    fn test_filter_compare() {
        let transformer = FilterCompareTransformer::default();
        let data = json!([
            {"name": "apple", "stock": 12},
            {"name": "pear", "stock": 0},
            {"name": "plum", "stock": "3"}
        ]);

        let arguments = args(json!([["$stock", "gt", 5], ["$name", "eq", "plum"]]));
        assert_eq!(
            transformer.transform(&data, Some(&arguments), None).unwrap(),
            json!([{"name": "apple", "stock": 12}, {"name": "plum", "stock": "3"}])
        );

        let arguments = args(json!([["$stock", "empty"]]));
        assert_eq!(
            transformer.transform(&data, Some(&arguments), None).unwrap(),
            json!([{"name": "pear", "stock": 0}])
        );

        let arguments = args(json!([["$missing", "eq", null, true]]));
        assert_eq!(transformer.transform(&data, Some(&arguments), None).unwrap(), data);

        assert_eq!(transformer.transform(&data, None, None).unwrap(), data);
    }

    #[test]
    fn test_filter_compare_rejects_malformed_rules() {
        let transformer = FilterCompareTransformer::default();
        let err = transformer
            .transform(&json!([1]), Some(&args(json!(["gt"]))), None)
            .unwrap_err();
        assert!(err.as_argument_error().is_some());

        let err = transformer
            .transform(&json!([1]), Some(&args(json!([["$", "bigger", 1]]))), None)
            .unwrap_err();
        assert!(err.as_argument_error().is_some());
    }

    #[test]
    fn test_map_property() {
        let transformer = MapPropertyTransformer::default();
        let data = json!({"first": {"user": {"id": 1}}, "second": {"user": {}}});

        assert_eq!(
            transformer.transform(&data, Some(&args(json!(["user.id", true]))), None).unwrap(),
            json!({"first": 1, "second": null})
        );
        assert!(matches!(
            transformer.transform(&data, Some(&args(json!(["user.id"]))), None),
            Err(Error::InvalidInputData { ref errors, .. }) if errors[0].starts_with("Element second:")
        ));
        assert!(matches!(
            transformer.transform(&data, None, None),
            Err(Error::InvalidArguments(_))
        ));
    }
}
