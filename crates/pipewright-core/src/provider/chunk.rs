//! Arguments for the Chunk transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion::{self, IntegerStrings};
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ChunkArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_length: Option<u64>,
    default_preserve_keys: bool,
}

impl ChunkArgumentProvider {
    pub const TRANSFORMER: &'static str = "Chunk";
    pub const ARGUMENT_INDEX_LENGTH: usize = 0;
    pub const ARGUMENT_INDEX_PRESERVE_KEYS: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_length: None,
            default_preserve_keys: false,
        }
    }

    pub fn with_default_length(mut self, length: Option<u64>) -> Self {
        self.default_length = length;
        self
    }

    pub fn with_default_preserve_keys(mut self, preserve_keys: bool) -> Self {
        self.default_preserve_keys = preserve_keys;
        self
    }

    /// Chunk size; integers and integer strings greater than zero
    pub fn get_length_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<usize, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_LENGTH);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_length.map(Value::from));

        coercion::positive_integer(&value, IntegerStrings::Numeric)
            .map(|length| usize::try_from(length).unwrap_or(usize::MAX))
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Length", error, arguments, payload)
            })
    }

    pub fn get_preserve_keys_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_PRESERVE_KEYS);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_preserve_keys));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "PreserveKeys", error, arguments, payload)
        })
    }
}

impl Default for ChunkArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
