//! Closed enumerations accepted as transformer arguments
//!
//! Every enumeration parses from its declared string values with an exact,
//! case-sensitive match and reports the valid values when parsing fails.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// A string did not match any member of an enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{value}\" is not a valid {kind} value")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

/// Enumeration usable as an argument value
pub trait ArgumentEnum: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// Name used in error messages and to tag enum literals
    const KIND: &'static str;

    fn variants() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn values() -> Vec<&'static str> {
        Self::variants().iter().map(Self::as_str).collect()
    }

    fn parse(value: &str) -> Result<Self, UnknownVariantError> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
            .ok_or_else(|| UnknownVariantError {
                kind: Self::KIND,
                value: value.to_string(),
                expected: Self::values(),
            })
    }
}

macro_rules! argument_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl ArgumentEnum for $name {
            const KIND: &'static str = $kind;

            fn variants() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                <Self as ArgumentEnum>::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariantError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <Self as ArgumentEnum>::parse(value)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        impl From<$name> for $crate::argument::ArgumentValue {
            fn from(member: $name) -> Self {
                $crate::argument::ArgumentValue::Enum($crate::argument::EnumLiteral::of(member))
            }
        }
    };
}

argument_enum! {
    /// Arithmetic operation applied by Calc
    pub enum CalcOperation: "CalcOperation" {
        Add => "add",
        Subtract => "subtract",
        Multiply => "multiply",
        Divide => "divide",
        Pow => "pow",
    }
}

argument_enum! {
    /// Target case for ChangeCase
    pub enum Case: "Case" {
        Lower => "lower",
        Upper => "upper",
        Title => "title",
    }
}

argument_enum! {
    /// Which quote characters EscapeHtml converts
    pub enum Quotes: "Quotes" {
        /// Double quotes only
        Compat => "compat",
        /// Double and single quotes
        Quotes => "quotes",
        /// Neither
        NoQuotes => "noquotes",
    }
}

argument_enum! {
    /// Entity table EscapeHtml encodes with
    pub enum TranslationTable: "TranslationTable" {
        Html401 => "html401",
        Xml1 => "xml1",
        Xhtml => "xhtml",
        Html5 => "html5",
    }
}

argument_enum! {
    /// Comparison operator of a filter rule
    pub enum Comparator: "Comparator" {
        Equals => "eq",
        NotEquals => "neq",
        GreaterThan => "gt",
        GreaterThanOrEquals => "gte",
        LessThan => "lt",
        LessThanOrEquals => "lte",
        In => "in",
        NotIn => "nin",
        Empty => "empty",
        NotEmpty => "nempty",
    }
}

argument_enum! {
    /// Digest algorithm used by Hash
    pub enum Algorithm: "Algorithm" {
        Md5 => "md5",
        Sha1 => "sha1",
        Sha256 => "sha256",
        Sha384 => "sha384",
        Sha512 => "sha512",
        Sha3_256 => "sha3-256",
        Sha3_512 => "sha3-512",
    }
}

argument_enum! {
    /// Side(s) of a string Trim operates on
    pub enum StringPosition: "StringPosition" {
        Start => "start",
        End => "end",
        Both => "both",
    }
}

argument_enum! {
    /// Ordering applied by Sort
    pub enum SortDirection: "SortDirection" {
        Asc => "asc",
        Desc => "desc",
    }
}

impl Comparator {
    /// Whether the comparator ignores its compare value
    pub fn is_unary(&self) -> bool {
        matches!(self, Comparator::Empty | Comparator::NotEmpty)
    }
}
