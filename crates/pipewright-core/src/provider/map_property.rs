//! Arguments for the MapProperty transformer
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
pub struct MapPropertyArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_accessor: Option<String>,
    default_return_null_on_failed_extraction: bool,
}

impl MapPropertyArgumentProvider {
    pub const TRANSFORMER: &'static str = "MapProperty";
    pub const ARGUMENT_INDEX_ACCESSOR: usize = 0;
    pub const ARGUMENT_INDEX_RETURN_NULL_ON_FAILED_EXTRACTION: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_accessor: None,
            default_return_null_on_failed_extraction: false,
        }
    }

    pub fn with_default_accessor(mut self, accessor: Option<String>) -> Self {
        self.default_accessor = accessor;
        self
    }

    pub fn with_default_return_null_on_failed_extraction(mut self, return_null: bool) -> Self {
        self.default_return_null_on_failed_extraction = return_null;
        self
    }

    /// Accessor applied to every element; integers are not accepted
    pub fn get_accessor_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_ACCESSOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_accessor);

        coercion::non_empty_string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Accessor", error, arguments, payload)
        })
    }

    pub fn get_return_null_on_failed_extraction_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<bool, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_RETURN_NULL_ON_FAILED_EXTRACTION);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &Some(self.default_return_null_on_failed_extraction));

        coercion::boolean(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "ReturnNullOnFailedExtraction",
                error,
                arguments,
                payload,
            )
        })
    }
}

impl Default for MapPropertyArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentErrorKind;
    use crate::provider::test_support::args;
    use serde_json::json;

    #[test]
    fn test_accessor_must_be_a_string() {
        let provider = MapPropertyArgumentProvider::default();
        assert_eq!(
            provider.get_accessor_argument_value(Some(&args(json!(["user.name"]))), &Value::Null, None),
            Ok("user.name".to_string())
        );

        let err = provider
            .get_accessor_argument_value(Some(&args(json!([0]))), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::InvalidType);

        let err = provider
            .get_accessor_argument_value(Some(&args(json!([""]))), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::OutOfRange);

        let err = provider.get_accessor_argument_value(None, &Value::Null, None).unwrap_err();
        assert_eq!(err.message(), "Accessor argument (0) is required");
    }

    #[test]
    fn test_return_null_flag() {
        let provider = MapPropertyArgumentProvider::default();
        assert_eq!(
            provider.get_return_null_on_failed_extraction_argument_value(None, &Value::Null, None),
            Ok(false)
        );
        assert_eq!(
            provider.get_return_null_on_failed_extraction_argument_value(
                Some(&args(json!(["id", true]))),
                &Value::Null,
                None
            ),
            Ok(true)
        );
    }
}
