//! Numeric transformers
//!
//! Integer arithmetic stays integral while it fits in an `i64` and falls back
//! to floating point otherwise. Numeric strings are accepted as input.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{expect_number, Transformer};
use crate::argument::ArgumentIterator;
use crate::enums::CalcOperation;
use crate::error::{Error, Result};
use crate::extraction::ExtractionContext;
use crate::provider::{CalcArgumentProvider, FormatNumberArgumentProvider, RoundArgumentProvider};
use serde_json::{Number, Value};

/// Precision beyond which rounding an `f64` is a no-op
const MAX_ROUND_PRECISION: u32 = 15;

/// Upper bound on rendered decimals
const MAX_FORMAT_DECIMALS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct CalcTransformer {
    arguments: CalcArgumentProvider,
}

impl CalcTransformer {
    pub fn new(arguments: CalcArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for CalcTransformer {
    fn name(&self) -> &'static str {
        CalcArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let operation = self.arguments.get_operation_argument_value(arguments, data, context)?;
        let operand = self
            .arguments
            .get_value_argument_value(operation, arguments, data, context)?;
        let number = expect_number(self.name(), data, arguments)?;

        calculate(operation, &number, &operand)
            .map(Value::Number)
            .ok_or_else(|| {
                Error::invalid_input_data(
                    self.name(),
                    format!("Result of {number} {operation} {operand} is not a finite number"),
                    arguments,
                    data,
                )
            })
    }
}

fn calculate(operation: CalcOperation, left: &Number, right: &Number) -> Option<Number> {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        let exact = match operation {
            CalcOperation::Add => a.checked_add(b),
            CalcOperation::Subtract => a.checked_sub(b),
            CalcOperation::Multiply => a.checked_mul(b),
            CalcOperation::Divide if b != 0 && a.checked_rem(b) == Some(0) => a.checked_div(b),
            CalcOperation::Pow => u32::try_from(b).ok().and_then(|exponent| a.checked_pow(exponent)),
            CalcOperation::Divide => None,
        };
        if let Some(result) = exact {
            return Some(Number::from(result));
        }
    }

    let (a, b) = (left.as_f64()?, right.as_f64()?);
    let result = match operation {
        CalcOperation::Add => a + b,
        CalcOperation::Subtract => a - b,
        CalcOperation::Multiply => a * b,
        CalcOperation::Divide => a / b,
        CalcOperation::Pow => a.powf(b),
    };
    Number::from_f64(result)
}

#[derive(Debug, Clone, Default)]
pub struct FormatNumberTransformer {
    arguments: FormatNumberArgumentProvider,
}

impl FormatNumberTransformer {
    pub fn new(arguments: FormatNumberArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for FormatNumberTransformer {
    fn name(&self) -> &'static str {
        FormatNumberArgumentProvider::TRANSFORMER
    }

    /// Render with a fixed number of decimals and grouped thousands
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let decimals = self.arguments.get_decimals_argument_value(arguments, data, context)?;
        let decimal_separator = self
            .arguments
            .get_decimal_separator_argument_value(arguments, data, context)?;
        let thousands_separator = self
            .arguments
            .get_thousands_separator_argument_value(arguments, data, context)?;
        let number = expect_number(self.name(), data, arguments)?;

        let value = number.as_f64().unwrap_or_default();
        Ok(Value::String(format_number(
            value,
            decimals.min(MAX_FORMAT_DECIMALS),
            &decimal_separator,
            &thousands_separator,
        )))
    }
}

fn format_number(value: f64, decimals: usize, decimal_separator: &str, thousands_separator: &str) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut result = String::with_capacity(rendered.len() + integer.len() / 3 * thousands_separator.len() + 1);
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            result.push_str(thousands_separator);
        }
        result.push(digit);
    }
    if !fraction.is_empty() {
        result.push_str(decimal_separator);
        result.push_str(fraction);
    }
    result
}

#[derive(Debug, Clone, Default)]
pub struct RoundTransformer {
    arguments: RoundArgumentProvider,
}

impl RoundTransformer {
    pub fn new(arguments: RoundArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for RoundTransformer {
    fn name(&self) -> &'static str {
        RoundArgumentProvider::TRANSFORMER
    }

    /// Round half away from zero; integers pass through unchanged
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let precision = self.arguments.get_precision_argument_value(arguments, data, context)?;
        let number = expect_number(self.name(), data, arguments)?;

        if !number.is_f64() || precision > MAX_ROUND_PRECISION {
            return Ok(Value::Number(number));
        }

        let value = number.as_f64().unwrap_or_default();
        let factor = 10f64.powi(precision as i32);
        let rounded = (value * factor).round() / factor;
        Ok(Number::from_f64(rounded).map_or(Value::Number(number), Value::Number))
    }
}
