//! Arguments for the FormatNumber transformer
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
pub struct FormatNumberArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_decimals: Option<u64>,
    default_decimal_separator: Option<String>,
    default_thousands_separator: Option<String>,
}

impl FormatNumberArgumentProvider {
    pub const TRANSFORMER: &'static str = "FormatNumber";
    pub const ARGUMENT_INDEX_DECIMALS: usize = 0;
    pub const ARGUMENT_INDEX_DECIMAL_SEPARATOR: usize = 1;
    pub const ARGUMENT_INDEX_THOUSANDS_SEPARATOR: usize = 2;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_decimals: Some(0),
            default_decimal_separator: Some(".".to_string()),
            default_thousands_separator: Some(",".to_string()),
        }
    }

    pub fn with_default_decimals(mut self, decimals: Option<u64>) -> Self {
        self.default_decimals = decimals;
        self
    }

    pub fn with_default_decimal_separator(mut self, separator: Option<String>) -> Self {
        self.default_decimal_separator = separator;
        self
    }

    pub fn with_default_thousands_separator(mut self, separator: Option<String>) -> Self {
        self.default_thousands_separator = separator;
        self
    }

    /// Number of decimals; strings must be made of digits only
    pub fn get_decimals_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<usize, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_DECIMALS);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_decimals.map(Value::from));

        coercion::non_negative_integer(&value, IntegerStrings::DigitsOnly)
            .map(|decimals| usize::try_from(decimals).unwrap_or(usize::MAX))
            .map_err(|error| {
                ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Decimals", error, arguments, payload)
            })
    }

    pub fn get_decimal_separator_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_DECIMAL_SEPARATOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_decimal_separator);

        coercion::string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "DecimalSeparator",
                error,
                arguments,
                payload,
            )
        })
    }

    pub fn get_thousands_separator_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<String, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_THOUSANDS_SEPARATOR);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_thousands_separator);

        coercion::string(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(
                Self::TRANSFORMER,
                &key,
                "ThousandsSeparator",
                error,
                arguments,
                payload,
            )
        })
    }
}

impl Default for FormatNumberArgumentProvider {
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
    fn test_defaults() {
        let provider = FormatNumberArgumentProvider::default();
        assert_eq!(provider.get_decimals_argument_value(None, &Value::Null, None), Ok(0));
        assert_eq!(
            provider.get_decimal_separator_argument_value(None, &Value::Null, None),
            Ok(".".to_string())
        );
        assert_eq!(
            provider.get_thousands_separator_argument_value(None, &Value::Null, None),
            Ok(",".to_string())
        );
    }

    #[test]
    fn test_decimals_accepts_digit_strings_only() {
        let provider = FormatNumberArgumentProvider::default();
        assert_eq!(
            provider.get_decimals_argument_value(Some(&args(json!(["2"]))), &Value::Null, None),
            Ok(2)
        );
        assert_eq!(
            provider.get_decimals_argument_value(Some(&args(json!([3]))), &Value::Null, None),
            Ok(3)
        );
        for raw in [json!("-2"), json!("1.5"), json!(""), json!(true)] {
            let err = provider
                .get_decimals_argument_value(Some(&args(json!([raw.clone()]))), &Value::Null, None)
                .unwrap_err();
            assert_eq!(err.kind, ArgumentErrorKind::InvalidType, "{raw}");
        }
        let err = provider
            .get_decimals_argument_value(Some(&args(json!([-1]))), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::OutOfRange);
    }

    #[test]
    fn test_separators_allow_empty_strings() {
        let provider = FormatNumberArgumentProvider::default();
        let arguments = args(json!([2, ",", ""]));
        assert_eq!(
            provider.get_decimal_separator_argument_value(Some(&arguments), &Value::Null, None),
            Ok(",".to_string())
        );
        assert_eq!(
            provider.get_thousands_separator_argument_value(Some(&arguments), &Value::Null, None),
            Ok(String::new())
        );
        assert!(provider
            .get_thousands_separator_argument_value(Some(&args(json!([2, ".", 0]))), &Value::Null, None)
            .is_err());
    }
}
