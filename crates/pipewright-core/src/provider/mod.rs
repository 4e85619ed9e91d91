//! Argument providers
//!
//! A provider turns the loosely typed [`ArgumentIterator`] handed to a
//! transformer into validated parameters. Every per-operation provider follows
//! the same sequence for each argument it owns:
//!
//! 1. look up the raw value at the argument's fixed key (absent means null)
//! 2. expand a deferred extraction against the payload and context
//! 3. substitute the configured default when the value is not supplied
//! 4. apply the coercion rule, failing with an [`ArgumentValidationError`]
//!
//! Steps 1 and 2 live behind the [`ArgumentProvider`] trait so they can be
//! swapped out in tests; steps 3 and 4 are specific to each operation.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod calc;
pub mod change_case;
pub mod chunk;
pub mod escape_html;
pub mod filter_compare;
pub mod format_date;
pub mod format_number;
pub mod hash;
pub mod join;
pub mod map_property;
pub mod max_words;
pub mod round;
pub mod set_property_value;
pub mod sort;
pub mod split;
pub mod strip_tags;
pub mod trim;
pub mod unique;
pub mod unset_property;
pub mod value_map;

pub use calc::CalcArgumentProvider;
pub use change_case::ChangeCaseArgumentProvider;
pub use chunk::ChunkArgumentProvider;
pub use escape_html::EscapeHtmlArgumentProvider;
pub use filter_compare::FilterCompareArgumentProvider;
pub use format_date::FormatDateArgumentProvider;
pub use format_number::FormatNumberArgumentProvider;
pub use hash::HashArgumentProvider;
pub use join::JoinArgumentProvider;
pub use map_property::MapPropertyArgumentProvider;
pub use max_words::MaxWordsArgumentProvider;
pub use round::RoundArgumentProvider;
pub use set_property_value::SetPropertyValueArgumentProvider;
pub use sort::SortArgumentProvider;
pub use split::SplitArgumentProvider;
pub use strip_tags::StripTagsArgumentProvider;
pub use trim::TrimArgumentProvider;
pub use unique::UniqueArgumentProvider;
pub use unset_property::UnsetPropertyArgumentProvider;
pub use value_map::ValueMapArgumentProvider;

use crate::argument::{ArgumentIterator, ArgumentKey, ArgumentValue};
use crate::extraction::{AccessorExtractor, ExtractionContext, ExtractionError, ExtractionResolver};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Looks up raw arguments and expands deferred extractions
pub trait ArgumentProvider: Send + Sync + fmt::Debug {
    /// Expand `value` if it is a deferred extraction, otherwise return it unchanged
    fn expand(
        &self,
        value: ArgumentValue,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ArgumentValue, ExtractionError>;

    /// Raw value at `key`; null when the container or the key is absent
    fn get_argument_value(&self, arguments: Option<&ArgumentIterator>, key: &ArgumentKey) -> ArgumentValue {
        arguments
            .and_then(|arguments| arguments.get_value(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Raw value at `key` with extraction expanded, surfacing extraction failures
    fn try_get_argument_value_with_extraction_expansion(
        &self,
        arguments: Option<&ArgumentIterator>,
        key: &ArgumentKey,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ArgumentValue, ExtractionError> {
        self.expand(self.get_argument_value(arguments, key), payload, context)
    }

    /// Raw value at `key` with extraction expanded; failed extractions become null
    fn get_argument_value_with_extraction_expansion(
        &self,
        arguments: Option<&ArgumentIterator>,
        key: &ArgumentKey,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> ArgumentValue {
        self.try_get_argument_value_with_extraction_expansion(arguments, key, payload, context)
            .unwrap_or_else(|error| {
                log::debug!("Extraction for argument {key} treated as not supplied: {error}");
                ArgumentValue::null()
            })
    }
}

/// Standard provider backed by an [`ExtractionResolver`]
#[derive(Debug, Clone)]
pub struct DefaultArgumentProvider {
    extractor: Arc<dyn ExtractionResolver>,
}

impl DefaultArgumentProvider {
    pub fn new(extractor: Arc<dyn ExtractionResolver>) -> Self {
        Self { extractor }
    }

    /// Default provider behind a shareable handle
    pub fn shared() -> Arc<dyn ArgumentProvider> {
        Arc::new(Self::default())
    }
}

impl Default for DefaultArgumentProvider {
    fn default() -> Self {
        Self::new(Arc::new(AccessorExtractor::new()))
    }
}

impl ArgumentProvider for DefaultArgumentProvider {
    fn expand(
        &self,
        value: ArgumentValue,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ArgumentValue, ExtractionError> {
        match value {
            ArgumentValue::Extraction(extraction) => {
                log::trace!("Expanding extraction {extraction}");
                self.extractor
                    .extract(&extraction, payload, context)
                    .map(ArgumentValue::Literal)
            }
            other => Ok(other),
        }
    }
}

/// Substitute `default` when `value` is null
pub(crate) fn default_if_null<T>(value: ArgumentValue, default: &Option<T>) -> ArgumentValue
where
    T: Clone + Into<ArgumentValue>,
{
    if value.is_null() {
        default.clone().map_or_else(ArgumentValue::null, Into::into)
    } else {
        value
    }
}

/// Substitute `default` when `value` is empty under falsy semantics
pub(crate) fn default_if_empty<T>(value: ArgumentValue, default: &Option<T>) -> ArgumentValue
where
    T: Clone + Into<ArgumentValue>,
{
    if value.is_empty() {
        default.clone().map_or_else(ArgumentValue::null, Into::into)
    } else {
        value
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::extraction::Extraction;

    /// Build arguments from raw configuration
    pub fn args(raw: Value) -> ArgumentIterator {
        ArgumentIterator::from_value(&raw).expect("test arguments must be an array or object")
    }

    /// Provider that resolves every extraction to a fixed value
    #[derive(Debug)]
    pub struct FixedExtractionProvider(pub Value);

    impl ArgumentProvider for FixedExtractionProvider {
        fn expand(
            &self,
            value: ArgumentValue,
            _payload: &Value,
            _context: Option<&ExtractionContext>,
        ) -> Result<ArgumentValue, ExtractionError> {
            match value {
                ArgumentValue::Extraction(_) => Ok(ArgumentValue::Literal(self.0.clone())),
                other => Ok(other),
            }
        }
    }

    pub fn extraction(accessor: &str) -> ArgumentValue {
        ArgumentValue::Extraction(Extraction::new(accessor))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{args, extraction};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_container_and_key_are_null() {
        let provider = DefaultArgumentProvider::default();
        assert!(provider.get_argument_value(None, &0.into()).is_null());
        assert!(provider.get_argument_value(Some(&args(json!([]))), &0.into()).is_null());
    }

    #[test]
    fn test_expansion_against_payload() {
        let provider = DefaultArgumentProvider::default();
        let arguments = ArgumentIterator::new().with(0, extraction("sku"));
        let value = provider.get_argument_value_with_extraction_expansion(
            Some(&arguments),
            &0.into(),
            &json!({"sku": "ABC"}),
            None,
        );
        assert_eq!(value, ArgumentValue::from("ABC"));
    }

    #[test]
    fn test_failed_extraction_coalesces_to_null() {
        let provider = DefaultArgumentProvider::default();
        let arguments = args(json!(["$missing.path"]));

        let value = provider.get_argument_value_with_extraction_expansion(Some(&arguments), &0.into(), &json!({}), None);
        assert!(value.is_null());

        let surfaced = provider.try_get_argument_value_with_extraction_expansion(
            Some(&arguments),
            &0.into(),
            &json!({}),
            None,
        );
        assert!(matches!(surfaced, Err(ExtractionError::PathNotFound { .. })));
    }

    #[test]
    fn test_default_helpers() {
        let default = Some("fallback");
        assert_eq!(default_if_null(ArgumentValue::null(), &default), ArgumentValue::from("fallback"));
        assert_eq!(default_if_null(ArgumentValue::from(""), &default), ArgumentValue::from(""));
        assert_eq!(default_if_empty(ArgumentValue::from(""), &default), ArgumentValue::from("fallback"));
        assert!(default_if_empty(ArgumentValue::from(false), &None::<&str>).is_null());
    }
}
