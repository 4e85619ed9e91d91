//! Arguments for the Join transformer
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
pub struct JoinArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_separator: Option<String>,
}

impl JoinArgumentProvider {
    pub const TRANSFORMER: &'static str = "Join";
    pub const ARGUMENT_INDEX_SEPARATOR: usize = 0;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_separator: Some(",".to_string()),
        }
    }

    pub fn with_default_separator(mut self, separator: Option<String>) -> Self {
        self.default_separator = separator;
        self
    }

    /// Any scalar, cast to string; the empty string is allowed
    pub fn get_separator_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_SEPARATOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_separator);

        coercion::scalar_string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Separator", error, arguments, payload)
        })
    }
}

impl Default for JoinArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
