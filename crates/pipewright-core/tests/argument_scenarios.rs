//! Integration tests for argument resolution through the public providers


use pipewright_core::provider::{
    ChunkArgumentProvider, EscapeHtmlArgumentProvider, FilterCompareArgumentProvider, HashArgumentProvider,
    MaxWordsArgumentProvider, SetPropertyValueArgumentProvider, StripTagsArgumentProvider, TrimArgumentProvider,
    ValueMapArgumentProvider,
};
use pipewright_core::{
    Algorithm, ArgumentErrorKind, ArgumentIterator, Comparator, ExtractionContext, FilterComparison, Quotes,
    StringPosition, ValueMapItem,
};
use serde_json::{json, Value};
use std::sync::Arc;
use test_support::{args, extraction, FailingExtractionProvider, FixedExtractionProvider};

#[test]
fn test_hash_algorithm_from_string() {
    let provider = HashArgumentProvider::default();
    let arguments = args(json!({"0": "sha3-256"}));

    assert_eq!(
        provider.get_algorithm_argument_value(Some(&arguments), &Value::Null, None),
        Ok(Algorithm::Sha3_256)
    );
}

#[test]
fn test_hash_algorithm_unrecognised() {
    let provider = HashArgumentProvider::default();
    let arguments = args(json!({"0": "sha9-999"}));
    let payload = json!({"id": 7});

    let err = provider
        .get_algorithm_argument_value(Some(&arguments), &payload, None)
        .unwrap_err();
    assert_eq!(err.kind, ArgumentErrorKind::Unrecognised);
    assert_eq!(err.transformer, "Hash");
    assert!(err.message().starts_with("Unrecognised Algorithm argument (0) value: \"sha9-999\""));
    assert!(err.message().contains("sha3-256"));
    assert_eq!(err.arguments.as_ref(), Some(&arguments));
    assert_eq!(err.payload, payload);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_trim_position_default() {
    let provider = TrimArgumentProvider::default().with_default_position(Some(StringPosition::Both));
    let empty = ArgumentIterator::new();

    assert_eq!(
        provider.get_position_argument_value(Some(&empty), &Value::Null, None),
        Ok(StringPosition::Both)
    );
    assert_eq!(
        provider.get_position_argument_value(None, &Value::Null, None),
        Ok(StringPosition::Both)
    );
}

#[test]
fn test_value_map_items() {
    let provider = ValueMapArgumentProvider::default();
    let arguments = args(json!({"0": {"foo": "bar", "baz": [1, 2]}, "1": false}));

    let items: Vec<ValueMapItem> = provider
        .get_value_map(Some(&arguments), &Value::Null, None)
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(
        items,
        vec![
            ValueMapItem::new(json!("foo"), json!("bar"), false, true),
            ValueMapItem::new(json!("baz"), json!([1, 2]), false, true),
        ]
    );
}

#[test]
fn test_value_map_item_flags_take_precedence() {
    let provider = ValueMapArgumentProvider::default().with_default_case_sensitive(false);
    let arguments = args(json!([
        [
            {"sourceValue": "a", "convertedValue": 1, "strict": false},
            {"sourceValue": "b", "convertedValue": 2, "caseSensitive": true}
        ]
    ]));

    let items: Vec<ValueMapItem> = provider
        .get_value_map(Some(&arguments), &Value::Null, None)
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(items[0], ValueMapItem::new(json!("a"), json!(1), false, false));
    assert_eq!(items[1], ValueMapItem::new(json!("b"), json!(2), true, true));
}

#[test]
fn test_chunk_length_strings() {
    let provider = ChunkArgumentProvider::default();

    assert_eq!(
        provider.get_length_argument_value(Some(&args(json!({"0": "250"}))), &Value::Null, None),
        Ok(250)
    );

    let err = provider
        .get_length_argument_value(Some(&args(json!({"0": "abc"}))), &Value::Null, None)
        .unwrap_err();
    assert!(matches!(err.kind, ArgumentErrorKind::InvalidType | ArgumentErrorKind::OutOfRange));
    assert!(err.message().contains("(0)"));
    assert!(err.message().contains("\"abc\""));
}

#[test]
fn test_defaults_apply_when_absent() {
    let provider = ChunkArgumentProvider::default()
        .with_default_length(Some(3))
        .with_default_preserve_keys(true);
    let empty = ArgumentIterator::new();

    assert_eq!(provider.get_length_argument_value(Some(&empty), &Value::Null, None), Ok(3));
    assert_eq!(provider.get_preserve_keys_argument_value(Some(&empty), &Value::Null, None), Ok(true));

    let provider = MaxWordsArgumentProvider::default()
        .with_default_max_words(Some(12))
        .with_default_truncation_string(Some("...".to_string()));
    assert_eq!(provider.get_max_words_argument_value(None, &Value::Null, None), Ok(12));
    assert_eq!(
        provider.get_truncation_string_argument_value(None, &Value::Null, None),
        Ok(Some("...".to_string()))
    );
}

#[test]
fn test_extraction_resolving_to_null_uses_default() {
    let arguments = ArgumentIterator::new().with(0, extraction("settings.quotes"));

    let provider = EscapeHtmlArgumentProvider::new(Arc::new(FixedExtractionProvider(Value::Null)))
        .with_default_quotes(Some(Quotes::Compat));
    assert_eq!(
        provider.get_quotes_argument_value(Some(&arguments), &Value::Null, None),
        Ok(Quotes::Compat)
    );

    let provider = EscapeHtmlArgumentProvider::new(Arc::new(FailingExtractionProvider))
        .with_default_quotes(Some(Quotes::NoQuotes));
    assert_eq!(
        provider.get_quotes_argument_value(Some(&arguments), &Value::Null, None),
        Ok(Quotes::NoQuotes)
    );

    let provider = EscapeHtmlArgumentProvider::new(Arc::new(FixedExtractionProvider(Value::Null)))
        .with_default_quotes(None);
    let err = provider
        .get_quotes_argument_value(Some(&arguments), &Value::Null, None)
        .unwrap_err();
    assert_eq!(err.kind, ArgumentErrorKind::Missing);
}

#[test]
fn test_extraction_reads_payload_and_context() {
    let provider = HashArgumentProvider::default();
    let arguments = args(json!(["$config::algorithm", "$user.salt"]));
    let payload = json!({"user": {"salt": 42}});
    let context = ExtractionContext::new().with("config", json!({"algorithm": "sha1"}));

    assert_eq!(
        provider.get_algorithm_argument_value(Some(&arguments), &payload, Some(&context)),
        Ok(Algorithm::Sha1)
    );
    assert_eq!(
        provider.get_salt_argument_value(Some(&arguments), &payload, Some(&context)),
        Ok("42".to_string())
    );
}

#[test]
fn test_chunk_length_rejections() {
    let provider = ChunkArgumentProvider::default();
    let rejected = [
        (json!(0), ArgumentErrorKind::OutOfRange),
        (json!(-1), ArgumentErrorKind::OutOfRange),
        (json!("foo"), ArgumentErrorKind::InvalidType),
        (Value::Null, ArgumentErrorKind::Missing),
        (json!(false), ArgumentErrorKind::InvalidType),
        (json!([1]), ArgumentErrorKind::InvalidType),
        (json!({"a": 1}), ArgumentErrorKind::InvalidType),
    ];

    for (raw, kind) in rejected {
        let arguments = args(json!([raw.clone()]));
        let err = provider
            .get_length_argument_value(Some(&arguments), &Value::Null, None)
            .unwrap_err();
        assert_eq!(err.kind, kind, "length {raw}");
    }

    for (raw, expected) in [(json!(1), 1), (json!(1000), 1000), (json!("250"), 250)] {
        assert_eq!(
            provider.get_length_argument_value(Some(&args(json!([raw]))), &Value::Null, None),
            Ok(expected)
        );
    }
}

#[test]
fn test_filter_compare_error_names_offending_position() {
    let provider = FilterCompareArgumentProvider::default();

    let arguments = args(json!([["$price", "gt", 10], "oops"]));
    let err = provider
        .get_filter_comparisons(Some(&arguments), &Value::Null, None)
        .unwrap_err();
    assert_eq!(err.kind, ArgumentErrorKind::Structural);
    assert!(err.message().contains("position 1"), "{}", err.message());
    assert!(!err.message().contains("position 0"));

    let arguments = args(json!([["$price", "gt", 10], ["$price", "between", 10]]));
    let err = provider
        .get_filter_comparisons(Some(&arguments), &Value::Null, None)
        .unwrap_err();
    assert_eq!(err.kind, ArgumentErrorKind::Structural);
    assert!(err.message().starts_with("Invalid filter comparison at position 1:"));
}

#[test]
fn test_filter_compare_mixed_entries() {
    let provider = FilterCompareArgumentProvider::default();
    let decoded = FilterComparison::new(extraction("kind"), Comparator::In, json!(["a", "b"]), true);
    let arguments = ArgumentIterator::new()
        .with(0, decoded.clone())
        .with(1, args(json!(["$price", "lte", "100"])));

    let comparisons: Vec<FilterComparison> = provider
        .get_filter_comparisons(Some(&arguments), &Value::Null, None)
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0], decoded);
    assert_eq!(comparisons[1].source_value, extraction("price"));
    assert_eq!(comparisons[1].comparator, Comparator::LessThanOrEquals);
    assert!(!comparisons[1].strict);
}

#[test]
fn test_set_property_value_passes_value_through() {
    let provider = SetPropertyValueArgumentProvider::default();
    let arguments = args(json!([7, {"nested": ["x"]}]));

    assert_eq!(
        provider.get_property_key_argument_value(Some(&arguments), &Value::Null, None),
        Ok("7".to_string())
    );
    assert_eq!(
        provider.get_property_value_argument_value(Some(&arguments), &Value::Null, None),
        json!({"nested": ["x"]})
    );
    assert_eq!(
        provider.get_property_separator_argument_value(Some(&arguments), &Value::Null, None),
        Ok(".".to_string())
    );
}

#[test]
fn test_compound_arguments_from_payload_are_resolved_once() {
    let payload = json!({
        "labels": {"draft": "$", "live": "\\$live", "gone": "$labels.draft"},
        "rules": [["$status", "eq", "$draft"]],
        "tags": ["b", "$i"]
    });
    let context = ExtractionContext::new().with("shared", payload.clone());

    for accessor in ["$labels", "$shared::labels"] {
        let items: Vec<ValueMapItem> = ValueMapArgumentProvider::default()
            .get_value_map(Some(&args(json!([accessor]))), &payload, Some(&context))
            .unwrap()
            .into_iter()
            .collect();
        let converted: Vec<Value> = items.into_iter().map(|item| item.converted_value).collect();
        assert_eq!(converted, [json!("$"), json!("\\$live"), json!("$labels.draft")], "{accessor}");
    }

    let comparisons: Vec<FilterComparison> = FilterCompareArgumentProvider::default()
        .get_filter_comparisons(Some(&args(json!(["$rules.0"]))), &payload, None)
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        comparisons,
        [FilterComparison::new(json!("$status"), Comparator::Equals, json!("$draft"), false)]
    );

    assert_eq!(
        StripTagsArgumentProvider::default().get_allowed_tags_argument_value(
            Some(&args(json!(["$tags"]))),
            &payload,
            None
        ),
        Ok(vec!["b".to_string(), "$i".to_string()])
    );
}
