//! Arguments for the FilterCompare transformer
//!
//! Each argument of FilterCompare is one comparison rule, written as
//! `[sourceValue, comparator, compareValue?, strict?]`. Rules decode in two
//! steps: [`FilterCompareArgumentProvider::normalize_comparison`] turns a raw
//! entry into a child argument container, then
//! [`FilterCompareArgumentProvider::get_filter_comparison`] decodes that
//! container through the single-rule argument getters.
//!
//! An entry may itself be an extraction; the data it resolves to is decoded
//! as a rule whose members are literal values.
//!
//! Source and compare values are passed through untouched (no extraction, no
//! default): the transformer resolves them against each item it filters.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{
    ArgumentIterator, ArgumentKey, ArgumentValue, FilterComparison, FilterComparisonIterator,
};
use crate::coercion;
use crate::enums::Comparator;
use crate::error::{ArgumentErrorKind, ArgumentValidationError};
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

/// A comparison entry after normalisation
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedComparison {
    /// Already decoded
    Decoded(FilterComparison),
    /// Child arguments still to decode
    Arguments(ArgumentIterator),
}

#[derive(Debug, Clone)]
pub struct FilterCompareArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_comparator: Option<Comparator>,
    default_strict: bool,
}

impl FilterCompareArgumentProvider {
    pub const TRANSFORMER: &'static str = "FilterCompare";
    pub const ARGUMENT_INDEX_SOURCE_VALUE: usize = 0;
    pub const ARGUMENT_INDEX_COMPARATOR: usize = 1;
    pub const ARGUMENT_INDEX_COMPARE_VALUE: usize = 2;
    pub const ARGUMENT_INDEX_STRICT: usize = 3;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_comparator: None,
            default_strict: false,
        }
    }

    pub fn with_default_comparator(mut self, comparator: Option<Comparator>) -> Self {
        self.default_comparator = comparator;
        self
    }

    pub fn with_default_strict(mut self, strict: bool) -> Self {
        self.default_strict = strict;
        self
    }

    /// Decode every argument into a comparison, preserving order
    pub fn get_filter_comparisons(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<FilterComparisonIterator, ArgumentValidationError> {
        let Some(entries) = arguments else {
            return Ok(FilterComparisonIterator::default());
        };

        let comparisons = entries
            .iter()
            .map(|entry| {
                let value = self.argument_provider.get_argument_value_with_extraction_expansion(
                    arguments,
                    entry.key(),
                    payload,
                    context,
                );
                let normalized = self.normalize_comparison(entry.key(), &value, arguments, payload)?;
                match normalized {
                    NormalizedComparison::Decoded(comparison) => Ok(comparison),
                    NormalizedComparison::Arguments(child) => self
                        .get_filter_comparison(Some(&child), payload, context)
                        .map_err(|error| {
                            ArgumentValidationError::nested(
                                Self::TRANSFORMER,
                                "filter comparison",
                                entry.key(),
                                error,
                                arguments,
                                payload,
                            )
                        }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FilterComparisonIterator::new(comparisons))
    }

    /// Turn one raw entry into a decoded comparison or a child container
    pub fn normalize_comparison(
        &self,
        key: &ArgumentKey,
        entry: &ArgumentValue,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
    ) -> Result<NormalizedComparison, ArgumentValidationError> {
        match entry {
            ArgumentValue::FilterComparison(comparison) => Ok(NormalizedComparison::Decoded((**comparison).clone())),
            ArgumentValue::Arguments(child) => Ok(NormalizedComparison::Arguments(child.clone())),
            ArgumentValue::Literal(Value::Array(items)) => {
                let child = items
                    .iter()
                    .take(Self::ARGUMENT_INDEX_STRICT + 1)
                    .enumerate()
                    .fold(ArgumentIterator::new(), |child, (index, item)| {
                        child.with(index, ArgumentValue::Literal(item.clone()))
                    });
                Ok(NormalizedComparison::Arguments(child))
            }
            other => Err(ArgumentValidationError::new(
                Self::TRANSFORMER,
                ArgumentErrorKind::Structural,
                format!(
                    "Filter comparison at position {key} must be an array of [sourceValue, comparator, compareValue, strict], received {}",
                    other.describe()
                ),
                arguments,
                payload,
            )),
        }
    }

    /// Decode a single `[sourceValue, comparator, compareValue?, strict?]` container
    pub fn get_filter_comparison(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<FilterComparison, ArgumentValidationError> {
        Ok(FilterComparison {
            source_value: self.get_source_value_argument_value(arguments),
            comparator: self.get_comparator_argument_value(arguments, payload, context)?,
            compare_value: self.get_compare_value_argument_value(arguments),
            strict: self.get_strict_argument_value(arguments, payload, context)?,
        })
    }

    /// Raw source value, possibly a deferred extraction
    pub fn get_source_value_argument_value(&self, arguments: Option<&ArgumentIterator>) -> ArgumentValue {
        self.argument_provider
            .get_argument_value(arguments, &ArgumentKey::Index(Self::ARGUMENT_INDEX_SOURCE_VALUE))
    }

    pub fn get_comparator_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Comparator, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_COMPARATOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_comparator);

        coercion::enum_member::<Comparator>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Comparator", error, arguments, payload)
        })
    }

    /// Raw compare value, possibly a deferred extraction
    pub fn get_compare_value_argument_value(&self, arguments: Option<&ArgumentIterator>) -> ArgumentValue {
        self.argument_provider
            .get_argument_value(arguments, &ArgumentKey::Index(Self::ARGUMENT_INDEX_COMPARE_VALUE))
    }

    pub fn get_strict_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_STRICT);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_strict));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Strict", error, arguments, payload)
        })
    }
}

impl Default for FilterCompareArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
