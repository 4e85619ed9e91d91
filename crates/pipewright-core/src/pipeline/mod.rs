//! Transformation pipelines
//!
//! A [`Pipeline`] runs an ordered list of transformer stages over a payload,
//! feeding each stage the output of the previous one. Stages are resolved by
//! name through a [`TransformerRegistry`], which is also the single place
//! where transformers are wired to their argument provider.
//!
//! # Example
//!
//! ```
//! use pipewright_core::pipeline::{Pipeline, PipelineConfig, TransformerRegistry};
//! use pipewright_core::provider::DefaultArgumentProvider;
//! use serde_json::json;
//!
//! let registry = TransformerRegistry::with_builtins(DefaultArgumentProvider::shared());
//! let config = PipelineConfig::from_json_str(
//!     r#"{"stages": [{"transformer": "Trim"}, {"transformer": "ChangeCase", "arguments": ["upper"]}]}"#,
//! )?;
//! let pipeline = Pipeline::from_config(&config, &registry)?;
//!
//! assert_eq!(pipeline.execute(&json!("  draft "), None)?, json!("DRAFT"));
//! # Ok::<(), pipewright_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod registry;

pub use config::{PipelineConfig, StageConfig};
pub use registry::TransformerRegistry;

use crate::argument::ArgumentIterator;
use crate::error::{Error, Result};
use crate::extraction::ExtractionContext;
use crate::transformer::Transformer;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Stage {
    transformer: Arc<dyn Transformer>,
    arguments: Option<ArgumentIterator>,
    optional: bool,
}

/// An ordered list of transformer stages
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every configured stage against `registry`
    pub fn from_config(config: &PipelineConfig, registry: &TransformerRegistry) -> Result<Self> {
        config.stages.iter().try_fold(Self::new(), |pipeline, stage| {
            let transformer = registry.get(&stage.transformer).map_err(|error| Error::Configuration {
                message: error.to_string(),
                context: Some(format!("stage {}", pipeline.len())),
            })?;
            Ok(pipeline.add_stage_with(transformer, stage.arguments.clone(), stage.optional))
        })
    }

    /// Append a required stage
    pub fn add_stage(self, transformer: Arc<dyn Transformer>, arguments: Option<ArgumentIterator>) -> Self {
        self.add_stage_with(transformer, arguments, false)
    }

    /// Append a stage whose failures are logged and skipped
    pub fn add_optional_stage(self, transformer: Arc<dyn Transformer>, arguments: Option<ArgumentIterator>) -> Self {
        self.add_stage_with(transformer, arguments, true)
    }

    fn add_stage_with(
        mut self,
        transformer: Arc<dyn Transformer>,
        arguments: Option<ArgumentIterator>,
        optional: bool,
    ) -> Self {
        self.stages.push(Stage {
            transformer,
            arguments,
            optional,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the stage transformers, in order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.transformer.name()).collect()
    }

    /// Run every stage in order, stopping at the first required stage that fails
    pub fn execute(&self, payload: &Value, context: Option<&ExtractionContext>) -> Result<Value> {
        let mut data = payload.clone();

        for (index, stage) in self.stages.iter().enumerate() {
            let name = stage.transformer.name();
            log::debug!("Running pipeline stage {index} ({name})");

            match stage.transformer.transform(&data, stage.arguments.as_ref(), context) {
                Ok(output) => data = output,
                Err(error) if stage.optional => {
                    log::warn!("Optional pipeline stage {index} ({name}) failed: {error}");
                }
                Err(error) => {
                    return Err(Error::Stage {
                        stage: index,
                        transformer: name.to_string(),
                        source: Box::new(error),
                    });
                }
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultArgumentProvider;
    use crate::transformer::{ChangeCaseTransformer, SplitTransformer, TrimTransformer};
    use serde_json::json;

    fn args(raw: Value) -> ArgumentIterator {
        ArgumentIterator::from_value(&raw).unwrap()
    }

    #[test]
    fn test_execute_in_order() {
        let pipeline = Pipeline::new()
            .add_stage(Arc::new(TrimTransformer::default()), None)
            .add_stage(Arc::new(SplitTransformer::default()), Some(args(json!([" "]))));

        assert_eq!(pipeline.stage_names(), ["Trim", "Split"]);
        assert_eq!(pipeline.execute(&json!("  a b "), None).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_failing_stage_is_wrapped() {
        let pipeline = Pipeline::new()
            .add_stage(Arc::new(TrimTransformer::default()), None)
            .add_stage(Arc::new(ChangeCaseTransformer::default()), Some(args(json!(["shout"]))));

        let err = pipeline.execute(&json!(" x "), None).unwrap_err();
        match &err {
            Error::Stage { stage, transformer, .. } => {
                assert_eq!(*stage, 1);
                assert_eq!(transformer, "ChangeCase");
            }
            other => panic!("expected stage error, got {other:?}"),
        }
        assert!(err.as_argument_error().is_some());
    }

    #[test]
    fn test_optional_stage_passes_input_on() {
        let pipeline = Pipeline::new()
            .add_optional_stage(Arc::new(ChangeCaseTransformer::default()), Some(args(json!(["shout"]))))
            .add_stage(Arc::new(TrimTransformer::default()), None);

        assert_eq!(pipeline.execute(&json!(" x "), None).unwrap(), json!("x"));
    }

    #[test]
    fn test_from_config() {
        let registry = TransformerRegistry::with_builtins(DefaultArgumentProvider::shared());
        let config = PipelineConfig {
            stages: vec![StageConfig::new("Trim"), StageConfig::new("Missing")],
        };

        match Pipeline::from_config(&config, &registry) {
            Err(Error::Configuration { message, context }) => {
                assert_eq!(message, "Unknown transformer: Missing");
                assert_eq!(context.as_deref(), Some("stage 1"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}
