//! Arguments for the UnsetProperty transformer
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
pub struct UnsetPropertyArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_property_separator: String,
}

impl UnsetPropertyArgumentProvider {
    pub const TRANSFORMER: &'static str = "UnsetProperty";
    pub const ARGUMENT_INDEX_PROPERTY_KEY: usize = 0;
    pub const ARGUMENT_INDEX_PROPERTY_SEPARATOR: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_property_separator: ".".to_string(),
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
}

impl Default for UnsetPropertyArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
