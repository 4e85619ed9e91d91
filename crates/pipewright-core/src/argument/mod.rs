//! Argument model: keys, raw values and the ordered container
//!
//! Transformers receive their configuration as an [`ArgumentIterator`]. Each
//! argument value is a tagged [`ArgumentValue`], so deferred extractions are
//! explicit data rather than something providers have to sniff for.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod compound;
pub mod iterator;
pub mod key;
pub mod value;

pub use compound::{FilterComparison, FilterComparisonIterator, ValueMapItem, ValueMapItemIterator};
pub use iterator::{Argument, ArgumentIterator};
pub use key::ArgumentKey;
pub use value::{ArgumentValue, EnumLiteral};
