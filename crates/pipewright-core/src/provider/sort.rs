//! Arguments for the Sort transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::SortDirection;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SortArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_direction: Option<SortDirection>,
}

impl SortArgumentProvider {
    pub const TRANSFORMER: &'static str = "Sort";
    pub const ARGUMENT_INDEX_DIRECTION: usize = 0;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_direction: Some(SortDirection::Asc),
        }
    }

    pub fn with_default_direction(mut self, direction: Option<SortDirection>) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn get_direction_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<SortDirection, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_DIRECTION);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_direction);

        coercion::enum_member::<SortDirection>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Direction", error, arguments, payload)
        })
    }
}

impl Default for SortArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
