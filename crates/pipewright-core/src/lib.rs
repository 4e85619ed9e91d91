//! Pipewright Core - Argument resolution for declarative data pipelines
//!
//! Transformation pipelines are configured as data: each stage names a
//! transformer and hands it a loosely typed list of arguments. This crate
//! turns those arguments into validated, typed parameters and runs the
//! transformers that consume them.
//!
//! # Main Components
//!
//! - **Arguments**: the ordered [`ArgumentIterator`] container and its tagged values
//! - **Extraction**: deferred `$path` lookups resolved against the payload or a context
//! - **Coercion**: the shared validation rules every provider applies
//! - **Providers**: one argument provider per transformer, with defaults and diagnostics
//! - **Transformers**: reference operations over JSON data
//! - **Pipeline**: registry-driven stage execution from JSON configuration
//!
//! # Example
//!
//! ```
//! use pipewright_core::provider::TrimArgumentProvider;
//! use pipewright_core::{ArgumentIterator, StringPosition};
//! use serde_json::json;
//!
//! let provider = TrimArgumentProvider::default();
//! let arguments = ArgumentIterator::from_value(&json!(["-", "$side"]))?;
//! let payload = json!({"side": "start"});
//!
//! let position = provider.get_position_argument_value(Some(&arguments), &payload, None)?;
//! assert_eq!(position, StringPosition::Start);
//! # Ok::<(), pipewright_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod argument;
pub mod coercion;
pub mod enums;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod provider;
pub mod transformer;

// Re-export main types for convenience
pub use argument::{
    Argument, ArgumentIterator, ArgumentKey, ArgumentValue, EnumLiteral, FilterComparison, FilterComparisonIterator,
    ValueMapItem, ValueMapItemIterator,
};
pub use enums::{
    Algorithm, ArgumentEnum, CalcOperation, Case, Comparator, Quotes, SortDirection, StringPosition,
    TranslationTable, UnknownVariantError,
};
pub use error::{ArgumentErrorKind, ArgumentValidationError, Error, Result};
pub use extraction::{AccessorExtractor, Extraction, ExtractionContext, ExtractionError, ExtractionResolver};
pub use pipeline::{Pipeline, PipelineConfig, StageConfig, TransformerRegistry};
pub use provider::{ArgumentProvider, DefaultArgumentProvider};
pub use transformer::Transformer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
