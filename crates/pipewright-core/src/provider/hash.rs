//! Arguments for the Hash transformer
//!
//! | Index | Argument  | Rule                                   |
//! |-------|-----------|----------------------------------------|
//! | 0     | Algorithm | enum, required (empty counts as absent)|
//! | 1     | Salt      | any scalar, cast to string             |
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_empty, default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::Algorithm;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HashArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_algorithm: Option<Algorithm>,
    default_salt: Option<String>,
}

impl HashArgumentProvider {
    pub const TRANSFORMER: &'static str = "Hash";
    pub const ARGUMENT_INDEX_ALGORITHM: usize = 0;
    pub const ARGUMENT_INDEX_SALT: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_algorithm: None,
            default_salt: Some(String::new()),
        }
    }

    pub fn with_default_algorithm(mut self, algorithm: Option<Algorithm>) -> Self {
        self.default_algorithm = algorithm;
        self
    }

    pub fn with_default_salt(mut self, salt: Option<String>) -> Self {
        self.default_salt = salt;
        self
    }

    pub fn get_algorithm_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Algorithm, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_ALGORITHM);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_empty(value, &self.default_algorithm);

        coercion::enum_member::<Algorithm>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Algorithm", error, arguments, payload)
        })
    }

    pub fn get_salt_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_SALT);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_salt);

        coercion::nullable_scalar_string(&value)
            .map(Option::unwrap_or_default)
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Salt", error, arguments, payload)
            })
    }
}

impl Default for HashArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
