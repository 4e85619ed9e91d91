//! Arguments for the FormatDate transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion::{self, CoercionError};
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use chrono::format::{Item, StrftimeItems};
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct FormatDateArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_format: Option<String>,
}

impl FormatDateArgumentProvider {
    pub const TRANSFORMER: &'static str = "FormatDate";
    pub const ARGUMENT_INDEX_FORMAT: usize = 0;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_format: Some(DEFAULT_DATE_FORMAT.to_string()),
        }
    }

    pub fn with_default_format(mut self, format: Option<String>) -> Self {
        self.default_format = format;
        self
    }

    /// strftime-style format string
    pub fn get_format_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_FORMAT);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_format);

        coercion::non_empty_string(&value)
            .and_then(|format| {
                if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
                    Err(CoercionError::OutOfRange {
                        expected: "a valid date format",
                        received: value.describe(),
                    })
                } else {
                    Ok(format)
                }
            })
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Format", error, arguments, payload)
            })
    }
}

impl Default for FormatDateArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
