//! Arguments for the ValueMap transformer
//!
//! A value map is a list of source-to-converted mappings. Each entry is
//! either an explicit item (`{"sourceValue": .., "convertedValue": ..}`,
//! optionally with `strict` / `caseSensitive` overrides) or a bare
//! `key => convertedValue` pair, in which case the entry's key is the
//! source value.
//!
//! The comparison flags resolve with three levels of precedence: the item's
//! own override, then the top-level Strict / CaseSensitive argument, then the
//! provider default.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey, ArgumentValue, ValueMapItem, ValueMapItemIterator};
use crate::coercion;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ValueMapArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_strict: bool,
    default_case_sensitive: bool,
}

impl ValueMapArgumentProvider {
    pub const TRANSFORMER: &'static str = "ValueMap";
    pub const ARGUMENT_INDEX_VALUE_MAP: usize = 0;
    pub const ARGUMENT_INDEX_STRICT: usize = 1;
    pub const ARGUMENT_INDEX_CASE_SENSITIVE: usize = 2;

    pub const ITEM_KEY_SOURCE_VALUE: &'static str = "sourceValue";
    pub const ITEM_KEY_CONVERTED_VALUE: &'static str = "convertedValue";
    pub const ITEM_KEY_STRICT: &'static str = "strict";
    pub const ITEM_KEY_CASE_SENSITIVE: &'static str = "caseSensitive";

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_strict: true,
            default_case_sensitive: true,
        }
    }

    pub fn with_default_strict(mut self, strict: bool) -> Self {
        self.default_strict = strict;
        self
    }

    pub fn with_default_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.default_case_sensitive = case_sensitive;
        self
    }

    /// Decode the value map argument into items, preserving order
    pub fn get_value_map(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ValueMapItemIterator, ArgumentValidationError> {
        let strict = self.get_strict_argument_value(arguments, payload, context)?;
        let case_sensitive = self.get_case_sensitive_argument_value(arguments, payload, context)?;
        let entries = self.get_value_map_argument_value(arguments, payload, context)?;

        let items = entries
            .iter()
            .map(|entry| {
                let child = Self::normalize_item(entry.key(), entry.value());
                self.get_value_map_item(Some(&child), strict, case_sensitive, payload, context)
                    .map_err(|error| {
                        ArgumentValidationError::nested(
                            Self::TRANSFORMER,
                            "value map item",
                            entry.key(),
                            error,
                            arguments,
                            payload,
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValueMapItemIterator::new(items))
    }

    /// Turn one value map entry into an item container
    ///
    /// Containers naming `sourceValue` or `convertedValue` are explicit items;
    /// anything else maps the entry key to the entry value.
    pub fn normalize_item(key: &ArgumentKey, entry: &ArgumentValue) -> ArgumentIterator {
        let explicit = match entry {
            ArgumentValue::Arguments(child) => Some(child.clone()),
            ArgumentValue::Literal(raw @ Value::Object(_)) => Some(ArgumentIterator::from_resolved(raw)),
            _ => None,
        };

        match explicit {
            Some(child) if Self::is_explicit_item(&child) => child,
            _ => ArgumentIterator::new()
                .with(Self::ITEM_KEY_SOURCE_VALUE, key.to_value())
                .with(Self::ITEM_KEY_CONVERTED_VALUE, entry.clone()),
        }
    }

    fn is_explicit_item(child: &ArgumentIterator) -> bool {
        child.contains_key(&Self::ITEM_KEY_SOURCE_VALUE.into())
            || child.contains_key(&Self::ITEM_KEY_CONVERTED_VALUE.into())
    }

    /// Decode a single item container, falling back to the given flags
    pub fn get_value_map_item(
        &self,
        arguments: Option<&ArgumentIterator>,
        strict: bool,
        case_sensitive: bool,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ValueMapItem, ArgumentValidationError> {
        let source_key = ArgumentKey::from(Self::ITEM_KEY_SOURCE_VALUE);
        let source = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &source_key, payload, context);
        let source_value = coercion::scalar(&source).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &source_key,
                "SourceValue",
                error,
                arguments,
                payload,
            )
        })?;

        let converted_value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(
                arguments,
                &ArgumentKey::from(Self::ITEM_KEY_CONVERTED_VALUE),
                payload,
                context,
            )
            .to_value();

        let strict = self.item_flag(arguments, Self::ITEM_KEY_STRICT, "Strict", strict, payload, context)?;
        let case_sensitive = self.item_flag(
            arguments,
            Self::ITEM_KEY_CASE_SENSITIVE,
            "CaseSensitive",
            case_sensitive,
            payload,
            context,
        )?;

        Ok(ValueMapItem::new(source_value, converted_value, strict, case_sensitive))
    }

    fn item_flag(
        &self,
        arguments: Option<&ArgumentIterator>,
        name: &str,
        argument_name: &str,
        fallback: bool,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::from(name);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(fallback));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, argument_name, error, arguments, payload)
        })
    }

    /// The raw value map container
    pub fn get_value_map_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<ArgumentIterator, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_VALUE_MAP);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);

        coercion::container(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "ValueMap", error, arguments, payload)
        })
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

    pub fn get_case_sensitive_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_CASE_SENSITIVE);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_case_sensitive));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "CaseSensitive", error, arguments, payload)
        })
    }
}

impl Default for ValueMapArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
