//! Arguments for the ChangeCase transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_empty, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::Case;
use crate::error::ArgumentValidationError;
use crate::extraction::ExtractionContext;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ChangeCaseArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_case: Option<Case>,
}

impl ChangeCaseArgumentProvider {
    pub const TRANSFORMER: &'static str = "ChangeCase";
    pub const ARGUMENT_INDEX_CASE: usize = 0;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_case: None,
        }
    }

    pub fn with_default_case(mut self, case: Option<Case>) -> Self {
        self.default_case = case;
        self
    }

    /// Case to convert to. `0`, `""` and `false` count as not supplied.
    pub fn get_case_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Case, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_CASE);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_empty(value, &self.default_case);

        coercion::enum_member::<Case>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Case", error, arguments, payload)
        })
    }
}

impl Default for ChangeCaseArgumentProvider {
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
    fn test_case_values() {
        let provider = ChangeCaseArgumentProvider::default();
        for (raw, expected) in [("lower", Case::Lower), ("upper", Case::Upper), ("title", Case::Title)] {
            let arguments = args(json!([raw]));
            assert_eq!(
                provider.get_case_argument_value(Some(&arguments), &Value::Null, None),
                Ok(expected)
            );
        }
    }

    #[test]
    fn test_falsy_values_are_missing() {
        let provider = ChangeCaseArgumentProvider::default();
        for raw in [json!([0]), json!([""]), json!([false]), json!([null])] {
            let arguments = args(raw.clone());
            let err = provider
                .get_case_argument_value(Some(&arguments), &Value::Null, None)
                .unwrap_err();
            assert_eq!(err.kind, ArgumentErrorKind::Missing, "{raw}");
        }
    }

    #[test]
    fn test_falsy_values_use_default() {
        let provider = ChangeCaseArgumentProvider::default().with_default_case(Some(Case::Upper));
        let arguments = args(json!([0]));
        assert_eq!(
            provider.get_case_argument_value(Some(&arguments), &Value::Null, None),
            Ok(Case::Upper)
        );
    }

    #[test]
    fn test_wrong_type_and_unknown_value() {
        let provider = ChangeCaseArgumentProvider::default();

        let arguments = args(json!([["upper"]]));
        let err = provider
            .get_case_argument_value(Some(&arguments), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::InvalidType);

        let arguments = args(json!(["UPPER"]));
        let err = provider
            .get_case_argument_value(Some(&arguments), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::Unrecognised);
    }

    #[test]
    fn test_extraction_resolving_to_case() {
        let provider = ChangeCaseArgumentProvider::default();
        let arguments = args(json!(["$settings.case"]));
        assert_eq!(
            provider.get_case_argument_value(Some(&arguments), &json!({"settings": {"case": "title"}}), None),
            Ok(Case::Title)
        );
    }
}
