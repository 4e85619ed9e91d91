//! Value objects decoded from compound arguments
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::value::ArgumentValue;
use crate::enums::Comparator;
use serde_json::{json, Value};

/// One comparison rule of a filter
///
/// Source and compare values stay unresolved: they may be deferred
/// extractions that the filter evaluates against each item it inspects.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterComparison {
    pub source_value: ArgumentValue,
    pub comparator: Comparator,
    pub compare_value: ArgumentValue,
    pub strict: bool,
}

impl FilterComparison {
    pub fn new(
        source_value: impl Into<ArgumentValue>,
        comparator: Comparator,
        compare_value: impl Into<ArgumentValue>,
        strict: bool,
    ) -> Self {
        Self {
            source_value: source_value.into(),
            comparator,
            compare_value: compare_value.into(),
            strict,
        }
    }

    pub fn to_value(&self) -> Value {
        json!([
            self.source_value.to_value(),
            self.comparator.as_str(),
            self.compare_value.to_value(),
            self.strict,
        ])
    }
}

/// Ordered list of filter comparisons, evaluated as alternatives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterComparisonIterator {
    comparisons: Vec<FilterComparison>,
}

impl FilterComparisonIterator {
    pub fn new(comparisons: Vec<FilterComparison>) -> Self {
        Self { comparisons }
    }

    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterComparison> {
        self.comparisons.iter()
    }
}

impl IntoIterator for FilterComparisonIterator {
    type Item = FilterComparison;
    type IntoIter = std::vec::IntoIter<FilterComparison>;

    fn into_iter(self) -> Self::IntoIter {
        self.comparisons.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilterComparisonIterator {
    type Item = &'a FilterComparison;
    type IntoIter = std::slice::Iter<'a, FilterComparison>;

    fn into_iter(self) -> Self::IntoIter {
        self.comparisons.iter()
    }
}

/// One source-to-converted mapping of a value map
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMapItem {
    pub source_value: Value,
    pub converted_value: Value,
    pub strict: bool,
    pub case_sensitive: bool,
}

impl ValueMapItem {
    pub fn new(source_value: Value, converted_value: Value, strict: bool, case_sensitive: bool) -> Self {
        Self {
            source_value,
            converted_value,
            strict,
            case_sensitive,
        }
    }
}

/// Ordered list of value map items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMapItemIterator {
    items: Vec<ValueMapItem>,
}

impl ValueMapItemIterator {
    pub fn new(items: Vec<ValueMapItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueMapItem> {
        self.items.iter()
    }
}

impl IntoIterator for ValueMapItemIterator {
    type Item = ValueMapItem;
    type IntoIter = std::vec::IntoIter<ValueMapItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMapItemIterator {
    type Item = &'a ValueMapItem;
    type IntoIter = std::slice::Iter<'a, ValueMapItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
