//! Pipeline configuration
//!
//! ```json
//! {
//!   "stages": [
//!     { "transformer": "Trim" },
//!     { "transformer": "ChangeCase", "arguments": ["$config::case"] },
//!     { "transformer": "ValueMap", "arguments": [{ "draft": "Draft" }], "optional": true }
//!   ]
//! }
//! ```
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use crate::argument::ArgumentIterator;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One transformer invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    /// Registered transformer name
    pub transformer: String,
    /// Raw arguments; omitted means no arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ArgumentIterator>,
    /// Failures of an optional stage are logged and its input passed on
    #[serde(default)]
    pub optional: bool,
}

impl StageConfig {
    pub fn new(transformer: impl Into<String>) -> Self {
        Self {
            transformer: transformer.into(),
            arguments: None,
            optional: false,
        }
    }

    pub fn with_arguments(mut self, arguments: ArgumentIterator) -> Self {
        self.arguments = Some(arguments);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Ordered list of stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub stages: Vec<StageConfig>,
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
