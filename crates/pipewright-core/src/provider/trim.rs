//! Arguments for the Trim transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::StringPosition;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TrimArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_characters: Option<String>,
    default_position: Option<StringPosition>,
}

impl TrimArgumentProvider {
    pub const TRANSFORMER: &'static str = "Trim";
    pub const ARGUMENT_INDEX_CHARACTERS: usize = 0;
    pub const ARGUMENT_INDEX_POSITION: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_characters: None,
            default_position: Some(StringPosition::Both),
        }
    }

    pub fn with_default_characters(mut self, characters: Option<String>) -> Self {
        self.default_characters = characters;
        self
    }

    pub fn with_default_position(mut self, position: Option<StringPosition>) -> Self {
        self.default_position = position;
        self
    }

    /// Characters to strip; `None` means whitespace
    pub fn get_characters_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Option<String>, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_CHARACTERS);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_characters);

        coercion::nullable_string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Characters", error, arguments, payload)
        })
    }

    pub fn get_position_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<StringPosition, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_POSITION);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_position);

        coercion::enum_member::<StringPosition>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Position", error, arguments, payload)
        })
    }
}

impl Default for TrimArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
