//! Arguments for the Round transformer
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
pub struct RoundArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_precision: Option<u64>,
}

impl RoundArgumentProvider {
    pub const TRANSFORMER: &'static str = "Round";
    pub const ARGUMENT_INDEX_PRECISION: usize = 0;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_precision: Some(0),
        }
    }

    pub fn with_default_precision(mut self, precision: Option<u64>) -> Self {
        self.default_precision = precision;
        self
    }

    pub fn get_precision_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<u32, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_PRECISION);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_precision.map(Value::from));

        coercion::non_negative_integer(&value, IntegerStrings::DigitsOnly)
            .map(|precision| u32::try_from(precision).unwrap_or(u32::MAX))
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Precision", error, arguments, payload)
            })
    }
}

impl Default for RoundArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::test_support::args;
    use serde_json::json;

    #[test]
    fn test_precision() {
        let provider = RoundArgumentProvider::default();
        assert_eq!(provider.get_precision_argument_value(None, &Value::Null, None), Ok(0));
        assert_eq!(
            provider.get_precision_argument_value(Some(&args(json!(["2"]))), &Value::Null, None),
            Ok(2)
        );
        assert!(provider
            .get_precision_argument_value(Some(&args(json!([-1]))), &Value::Null, None)
            .is_err());
        assert!(provider
            .get_precision_argument_value(Some(&args(json!(["two"]))), &Value::Null, None)
            .is_err());
    }
}
