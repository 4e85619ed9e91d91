//! Arguments for the StripTags transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StripTagsArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
}

impl StripTagsArgumentProvider {
    pub const TRANSFORMER: &'static str = "StripTags";
    pub const ARGUMENT_INDEX_ALLOWED_TAGS: usize = 0;
    pub const ARGUMENT_INDEX_STRIP_CONTENT_FOR_TAGS: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self { argument_provider }
    }

    /// Tags kept in the output; empty when not supplied
    pub fn get_allowed_tags_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Vec<String>, ArgumentValidationError> {
        self.tag_list(Self::ARGUMENT_INDEX_ALLOWED_TAGS, "AllowedTags", arguments, payload, context)
    }

    /// Tags removed together with their content
    pub fn get_strip_content_for_tags_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Vec<String>, ArgumentValidationError> {
        self.tag_list(
            Self::ARGUMENT_INDEX_STRIP_CONTENT_FOR_TAGS,
            "StripContentForTags",
            arguments,
            payload,
            context,
        )
    }

    fn tag_list(
        &self,
        index: usize,
        argument_name: &str,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Vec<String>, ArgumentValidationError> {
        let key = ArgumentKey::Index(index);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);

        coercion::string_array(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, argument_name, error, arguments, payload)
        })
    }
}

impl Default for StripTagsArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
