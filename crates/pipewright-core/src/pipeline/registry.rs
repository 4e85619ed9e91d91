//! Transformer registry
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::provider::{
    ArgumentProvider, CalcArgumentProvider, ChangeCaseArgumentProvider, ChunkArgumentProvider,
    EscapeHtmlArgumentProvider, FormatDateArgumentProvider, FormatNumberArgumentProvider,
    HashArgumentProvider, JoinArgumentProvider, MaxWordsArgumentProvider, RoundArgumentProvider,
    SetPropertyValueArgumentProvider, SortArgumentProvider, SplitArgumentProvider, StripTagsArgumentProvider,
    TrimArgumentProvider, UniqueArgumentProvider, UnsetPropertyArgumentProvider, ValueMapArgumentProvider,
};
use crate::transformer::{
    CalcTransformer, ChangeCaseTransformer, ChunkTransformer, EscapeHtmlTransformer, FilterCompareTransformer,
    FormatDateTransformer, FormatNumberTransformer, HashTransformer, JoinTransformer, MapPropertyTransformer,
    MaxWordsTransformer, RoundTransformer, SetPropertyValueTransformer, SortTransformer, SplitTransformer,
    StripTagsTransformer, Transformer, TrimTransformer, UniqueTransformer, UnsetPropertyTransformer,
    ValueMapTransformer,
};
use indexmap::IndexMap;
use std::sync::Arc;

/// Transformers by name, in registration order
#[derive(Debug, Clone, Default)]
pub struct TransformerRegistry {
    transformers: IndexMap<String, Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in transformer, all sharing `argument_provider`
    pub fn with_builtins(argument_provider: Arc<dyn ArgumentProvider>) -> Self {
        let provider = || argument_provider.clone();

        Self::new()
            .register(CalcTransformer::new(CalcArgumentProvider::new(provider())))
            .register(ChangeCaseTransformer::new(ChangeCaseArgumentProvider::new(provider())))
            .register(ChunkTransformer::new(ChunkArgumentProvider::new(provider())))
            .register(EscapeHtmlTransformer::new(EscapeHtmlArgumentProvider::new(provider())))
            .register(FilterCompareTransformer::new(provider()))
            .register(FormatDateTransformer::new(FormatDateArgumentProvider::new(provider())))
            .register(FormatNumberTransformer::new(FormatNumberArgumentProvider::new(provider())))
            .register(HashTransformer::new(HashArgumentProvider::new(provider())))
            .register(JoinTransformer::new(JoinArgumentProvider::new(provider())))
            .register(MapPropertyTransformer::new(provider()))
            .register(MaxWordsTransformer::new(MaxWordsArgumentProvider::new(provider())))
            .register(RoundTransformer::new(RoundArgumentProvider::new(provider())))
            .register(SetPropertyValueTransformer::new(SetPropertyValueArgumentProvider::new(provider())))
            .register(SortTransformer::new(SortArgumentProvider::new(provider())))
            .register(SplitTransformer::new(SplitArgumentProvider::new(provider())))
            .register(StripTagsTransformer::new(StripTagsArgumentProvider::new(provider())))
            .register(TrimTransformer::new(TrimArgumentProvider::new(provider())))
            .register(UniqueTransformer::new(UniqueArgumentProvider::new(provider())))
            .register(UnsetPropertyTransformer::new(UnsetPropertyArgumentProvider::new(provider())))
            .register(ValueMapTransformer::new(ValueMapArgumentProvider::new(provider())))
    }

    /// Add a transformer under its own name, replacing any previous one
    pub fn register(mut self, transformer: impl Transformer + 'static) -> Self {
        self.insert(Arc::new(transformer));
        self
    }

    pub fn insert(&mut self, transformer: Arc<dyn Transformer>) {
        let name = transformer.name().to_string();
        if self.transformers.insert(name.clone(), transformer).is_some() {
            log::debug!("Replaced transformer {name}");
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Transformer>> {
        self.transformers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTransformer {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultArgumentProvider;
    use serde_json::json;

    #[test]
    fn test_builtins() {
        let registry = TransformerRegistry::with_builtins(DefaultArgumentProvider::shared());
        assert_eq!(registry.len(), 20);
        assert!(registry.contains("ValueMap"));
        assert!(registry.contains("FilterCompare"));

        let trim = registry.get("Trim").unwrap();
        assert_eq!(trim.transform(&json!(" x "), None, None).unwrap(), json!("x"));
    }

    #[test]
    fn test_unknown_transformer() {
        let registry = TransformerRegistry::new().register(TrimTransformer::default());
        match registry.get("Nope") {
            Err(Error::UnknownTransformer { name, available }) => {
                assert_eq!(name, "Nope");
                assert_eq!(available, vec!["Trim".to_string()]);
            }
            other => panic!("expected unknown transformer, got {other:?}"),
        }
    }
}
