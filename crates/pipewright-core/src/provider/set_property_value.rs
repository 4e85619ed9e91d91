//! Arguments for the SetPropertyValue transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SetPropertyValueArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_property_separator: String,
    default_associative: bool,
}

impl SetPropertyValueArgumentProvider {
    pub const TRANSFORMER: &'static str = "SetPropertyValue";
    pub const ARGUMENT_INDEX_PROPERTY_KEY: usize = 0;
    pub const ARGUMENT_INDEX_PROPERTY_VALUE: usize = 1;
    pub const ARGUMENT_INDEX_PROPERTY_SEPARATOR: usize = 2;
    pub const ARGUMENT_INDEX_ASSOCIATIVE: usize = 3;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_property_separator: ".".to_string(),
            default_associative: true,
        }
    }

    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_default_property_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "default property separator must not be empty");
        self.default_property_separator = separator;
        self
    }

    pub fn with_default_associative(mut self, associative: bool) -> Self {
        self.default_associative = associative;
        self
    }

    /// Property path to write; integers are accepted and returned as strings
    pub fn get_property_key_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_PROPERTY_KEY);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);

        coercion::string_or_integer(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "PropertyKey", error, arguments, payload)
        })
    }

    /// Value to write, passed through without coercion
    pub fn get_property_value_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Value {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_PROPERTY_VALUE);
        self.argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context)
            .to_value()
    }

    pub fn get_property_separator_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_PROPERTY_SEPARATOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_property_separator.clone()));

        coercion::non_empty_string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "PropertySeparator",
                error,
                arguments,
                payload,
            )
        })
    }

    /// Whether missing intermediate properties are created as objects rather than arrays
    pub fn get_associative_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_ASSOCIATIVE);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_associative));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Associative", error, arguments, payload)
        })
    }
}

impl Default for SetPropertyValueArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
