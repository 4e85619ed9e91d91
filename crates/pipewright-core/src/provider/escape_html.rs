//! Arguments for the EscapeHtml transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::{Quotes, TranslationTable};
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EscapeHtmlArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_quotes: Option<Quotes>,
    default_translation_table: Option<TranslationTable>,
    default_allow_double_encoding: bool,
}

impl EscapeHtmlArgumentProvider {
    pub const TRANSFORMER: &'static str = "EscapeHtml";
    pub const ARGUMENT_INDEX_QUOTES: usize = 0;
    pub const ARGUMENT_INDEX_TRANSLATION_TABLE: usize = 1;
    pub const ARGUMENT_INDEX_ALLOW_DOUBLE_ENCODING: usize = 2;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_quotes: Some(Quotes::Quotes),
            default_translation_table: Some(TranslationTable::Html401),
            default_allow_double_encoding: true,
        }
    }

    pub fn with_default_quotes(mut self, quotes: Option<Quotes>) -> Self {
        self.default_quotes = quotes;
        self
    }

    pub fn with_default_translation_table(mut self, translation_table: Option<TranslationTable>) -> Self {
        self.default_translation_table = translation_table;
        self
    }

    pub fn with_default_allow_double_encoding(mut self, allow_double_encoding: bool) -> Self {
        self.default_allow_double_encoding = allow_double_encoding;
        self
    }

    pub fn get_quotes_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Quotes, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_QUOTES);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_quotes);

        coercion::enum_member::<Quotes>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Quotes", error, arguments, payload)
        })
    }

    pub fn get_translation_table_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<TranslationTable, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_TRANSLATION_TABLE);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_translation_table);

        coercion::enum_member::<TranslationTable>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "TranslationTable",
                error,
                arguments,
                payload,
            )
        })
    }

    pub fn get_allow_double_encoding_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_ALLOW_DOUBLE_ENCODING);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_allow_double_encoding));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "AllowDoubleEncoding",
                error,
                arguments,
                payload,
            )
        })
    }
}

impl Default for EscapeHtmlArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
