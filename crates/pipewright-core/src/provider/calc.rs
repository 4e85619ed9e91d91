//! Arguments for the Calc transformer
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{default_if_null, ArgumentProvider, DefaultArgumentProvider};
use crate::argument::{ArgumentIterator, ArgumentKey};
use crate::coercion;
use crate::enums::CalcOperation;
use crate::error::{ArgumentErrorKind, ArgumentValidationError};
use crate::extraction::ExtractionContext;
use serde_json::{Number, Value};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CalcArgumentProvider {
    argument_provider: Arc<dyn ArgumentProvider>,
    default_operation: Option<CalcOperation>,
    default_value: Option<Number>,
}

impl CalcArgumentProvider {
    pub const TRANSFORMER: &'static str = "Calc";
    pub const ARGUMENT_INDEX_OPERATION: usize = 0;
    pub const ARGUMENT_INDEX_VALUE: usize = 1;

    pub fn new(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        Self {
            argument_provider,
            default_operation: None,
            default_value: None,
        }
    }

    pub fn with_default_operation(mut self, operation: Option<CalcOperation>) -> Self {
        self.default_operation = operation;
        self
    }

    pub fn with_default_value(mut self, value: Option<Number>) -> Self {
        self.default_value = value;
        self
    }

    pub fn get_operation_argument_value(
        &self,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<CalcOperation, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_OPERATION);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_operation);

        coercion::enum_member::<CalcOperation>(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Operation", error, arguments, payload)
        })
    }

    /// Operand for `operation`; zero is rejected when dividing
    pub fn get_value_argument_value(
        &self,
        operation: CalcOperation,
        arguments: Option<&ArgumentIterator>,
        payload: &Value,
        context: Option<&ExtractionContext>,
    ) -> Result<Number, ArgumentValidationError> {
        let key = ArgumentKey::Index(Self::ARGUMENT_INDEX_VALUE);
        let value = self
            .argument_provider
            .get_argument_value_with_extraction_expansion(arguments, &key, payload, context);
        let value = default_if_null(value, &self.default_value.clone().map(Value::Number));

        let number = coercion::numeric(&value).map_err(|error| {
            ArgumentValidationError::from_coercion(Self::TRANSFORMER, &key, "Value", error, arguments, payload)
        })?;

        if operation == CalcOperation::Divide && number.as_f64() == Some(0.0) {
            return Err(ArgumentValidationError::new(
                Self::TRANSFORMER,
                ArgumentErrorKind::OutOfRange,
                format!("Value argument ({key}) must not be zero for {operation} operations"),
                arguments,
                payload,
            ));
        }

        Ok(number)
    }
}

impl Default for CalcArgumentProvider {
    fn default() -> Self {
        Self::new(DefaultArgumentProvider::shared())
    }
}
