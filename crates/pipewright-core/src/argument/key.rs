//! Argument keys
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;

/// Key of a single argument: a position or, inside compound structures, a name
///
/// Names that are canonical unsigned integers (`"0"`, `"12"`) are normalised to
/// positions so that `{"0": x}` and `[x]` address the same argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgumentKey {
    Index(usize),
    Name(String),
}

impl ArgumentKey {
    /// Build a key from a name, normalising canonical integers to positions
    pub fn parse(name: &str) -> Self {
        let canonical = !name.is_empty()
            && name.bytes().all(|b| b.is_ascii_digit())
            && (name == "0" || !name.starts_with('0'));

        match name.parse::<usize>() {
            Ok(index) if canonical => ArgumentKey::Index(index),
            _ => ArgumentKey::Name(name.to_string()),
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            ArgumentKey::Index(index) => Some(*index),
            ArgumentKey::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            ArgumentKey::Index(_) => None,
            ArgumentKey::Name(name) => Some(name),
        }
    }

    /// The key as a JSON value (positions become numbers)
    pub fn to_value(&self) -> Value {
        match self {
            ArgumentKey::Index(index) => Value::from(*index),
            ArgumentKey::Name(name) => Value::String(name.clone()),
        }
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKey::Index(index) => write!(f, "{index}"),
            ArgumentKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for ArgumentKey {
    fn from(index: usize) -> Self {
        ArgumentKey::Index(index)
    }
}

impl From<&str> for ArgumentKey {
    fn from(name: &str) -> Self {
        ArgumentKey::parse(name)
    }
}

impl From<String> for ArgumentKey {
    fn from(name: String) -> Self {
        ArgumentKey::parse(&name)
    }
}
