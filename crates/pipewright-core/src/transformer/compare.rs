//! Loose value comparison
//!
//! Non-strict comparisons treat numeric strings as numbers, compare booleans
//! by truthiness and treat `null` as equal to any empty value. Strict
//! comparisons require the same JSON type.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use crate::argument::ArgumentValue;
use crate::coercion::scalar_to_string;
use crate::enums::Comparator;
use serde_json::Value;
use std::cmp::Ordering;

/// Whether a value counts as empty: null, false, 0, "", "0" or an empty container
pub fn is_empty(value: &Value) -> bool {
    ArgumentValue::Literal(value.clone()).is_empty()
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Equality with type juggling
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, other) | (other, Value::Null) => is_empty(other) && other.as_str() != Some("0"),
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == !is_empty(other),
        (Value::Number(_), Value::Number(_)) => as_number(left) == as_number(right),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            match (as_number(left), as_number(right)) {
                (Some(a), Some(b)) => a == b,
                _ => scalar_to_string(left) == scalar_to_string(right),
            }
        }
        (Value::String(a), Value::String(b)) => match (as_number(left), as_number(right)) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        _ => left == right,
    }
}

/// Equality requiring the same JSON type; numbers compare by value
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            (a.is_f64() == b.is_f64()) && a.as_f64() == b.as_f64()
        }
        _ => left == right,
    }
}

pub fn equals(left: &Value, right: &Value, strict: bool) -> bool {
    if strict {
        strict_equals(left, right)
    } else {
        loose_equals(left, right)
    }
}

/// Ordering of two scalars, `None` when they are not comparable
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => match (as_number(left), as_number(right)) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => Some(a.cmp(b)),
        },
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => match (as_number(left), as_number(right)) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => None,
        },
    }
}

/// Sort class: numbers and numeric strings share one class so they order by value
fn sort_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) if as_number(value).is_some() => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total ordering for sorting
///
/// Values order by class first (null, bool, numeric, other strings, array,
/// object), then numerically or lexicographically within the class.
/// Containers within a class compare equal.
pub fn sort_order(left: &Value, right: &Value) -> Ordering {
    sort_rank(left).cmp(&sort_rank(right)).then_with(|| match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) if as_number(left).is_none() => a.cmp(b),
        _ => match (as_number(left), as_number(right)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    })
}

/// Evaluate one comparator against resolved operands
pub fn evaluate(comparator: Comparator, source: &Value, compare: &Value, strict: bool) -> bool {
    match comparator {
        Comparator::Equals => equals(source, compare, strict),
        Comparator::NotEquals => !equals(source, compare, strict),
        Comparator::GreaterThan => compare_values(source, compare) == Some(Ordering::Greater),
        Comparator::GreaterThanOrEquals => {
            matches!(compare_values(source, compare), Some(Ordering::Greater | Ordering::Equal))
        }
        Comparator::LessThan => compare_values(source, compare) == Some(Ordering::Less),
        Comparator::LessThanOrEquals => {
            matches!(compare_values(source, compare), Some(Ordering::Less | Ordering::Equal))
        }
        Comparator::In => contains(compare, source, strict),
        Comparator::NotIn => !contains(compare, source, strict),
        Comparator::Empty => is_empty(source),
        Comparator::NotEmpty => !is_empty(source),
    }
}

fn contains(haystack: &Value, needle: &Value, strict: bool) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| equals(item, needle, strict)),
        Value::Object(map) => map.values().any(|item| equals(item, needle, strict)),
        _ => false,
    }
}

/// Scalar values as JSON, containers by type name
pub fn describe(value: &Value) -> String {
    ArgumentValue::Literal(value.clone()).describe()
}
