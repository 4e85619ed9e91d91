//! Arguments for the MaxWords transformer
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
pub struct MaxWordsArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_max_words: Option<u64>,
    default_truncation_string: Option<String>,
}

impl MaxWordsArgumentProvider {
    pub const TRANSFORMER: &'static str = "MaxWords";
    pub const ARGUMENT_INDEX_MAX_WORDS: usize = 0;
    pub const ARGUMENT_INDEX_TRUNCATION_STRING: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_max_words: None,
            default_truncation_string: None,
        }
    }

    pub fn with_default_max_words(mut self, max_words: Option<u64>) -> Self {
        self.default_max_words = max_words;
        self
    }

    pub fn with_default_truncation_string(mut self, truncation_string: Option<String>) -> Self {
        self.default_truncation_string = truncation_string;
        self
    }

    pub fn get_max_words_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<usize, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_MAX_WORDS);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_max_words.map(Value::from));

        coercion::positive_integer(&value, IntegerStrings::DigitsOnly)
            .map(|max_words| usize::try_from(max_words).unwrap_or(usize::MAX))
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "MaxWords", error, arguments, payload)
            })
    }

    /// Text appended after truncation; scalars are cast to string
    pub fn get_truncation_string_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Option<String>, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_TRUNCATION_STRING);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_truncation_string);

        coercion::nullable_scalar_string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "TruncationString",
                error,
                arguments,
                payload,
            )
        })
    }
}

impl Default for MaxWordsArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
