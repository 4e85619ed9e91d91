//! Arguments for the Unique transformer
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
pub struct UniqueArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_strict: bool,
    default_retain_keys: bool,
}

impl UniqueArgumentProvider {
    pub const TRANSFORMER: &'static str = "Unique";
    pub const ARGUMENT_INDEX_STRICT: usize = 0;
    pub const ARGUMENT_INDEX_RETAIN_KEYS: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_strict: false,
            default_retain_keys: false,
        }
    }

    pub fn with_default_strict(mut self, strict: bool) -> Self {
        self.default_strict = strict;
        self
    }

    pub fn with_default_retain_keys(mut self, retain_keys: bool) -> Self {
        self.default_retain_keys = retain_keys;
        self
    }

    pub fn get_strict_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        self.flag(Self::ARGUMENT_INDEX_STRICT, "Strict", self.default_strict, arguments, payload, context)
    }

    pub fn get_retain_keys_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        self.flag(
            Self::ARGUMENT_INDEX_RETAIN_KEYS,
            "RetainKeys",
            self.default_retain_keys,
            arguments,
            payload,
            context,
        )
    }

    fn flag(
        &self,
        index: usize,
        argument_name: &str,
        default: bool,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(index);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(default));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, argument_name, error, arguments, payload)
        })
    }
}

impl Default for UniqueArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
