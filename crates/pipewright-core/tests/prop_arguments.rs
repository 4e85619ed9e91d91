//! Property-based tests for argument resolution
//!
//! These tests verify invariants that should hold for every raw argument
//! value a provider can be handed.


use pipewright_core::coercion::enum_member;
use pipewright_core::provider::{
    ChunkArgumentProvider, FilterCompareArgumentProvider, FormatNumberArgumentProvider, HashArgumentProvider,
    TrimArgumentProvider, ValueMapArgumentProvider,
};
use pipewright_core::{
    Algorithm, ArgumentEnum, ArgumentIterator, ArgumentValue, CalcOperation, Case, Comparator, EnumLiteral,
    ExtractionContext, Quotes, SortDirection, StringPosition, TranslationTable,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use test_support::args;

// Strategy functions for property testing

/// Strategy for generating arbitrary raw configuration values
fn raw_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z0-9$ ._:-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Strategy for generating a raw argument list
fn raw_arguments_strategy() -> impl Strategy<Value = Value> {
    proptest::collection::vec(raw_value_strategy(), 0..5).prop_map(Value::Array)
}

fn assert_enum_round_trip<E: ArgumentEnum>() {
    for &member in E::variants() {
        let from_instance = enum_member::<E>(&ArgumentValue::Enum(EnumLiteral::of(member)));
        let from_string = enum_member::<E>(&ArgumentValue::from(member.as_str()));
        assert_eq!(from_instance, Ok(member));
        assert_eq!(from_string, Ok(member));
    }
}

#[test]
fn test_every_enum_member_coerces_alike() {
    assert_enum_round_trip::<Algorithm>();
    assert_enum_round_trip::<CalcOperation>();
    assert_enum_round_trip::<Case>();
    assert_enum_round_trip::<Comparator>();
    assert_enum_round_trip::<Quotes>();
    assert_enum_round_trip::<SortDirection>();
    assert_enum_round_trip::<StringPosition>();
    assert_enum_round_trip::<TranslationTable>();
}

proptest! {
    #[test]
    fn prop_algorithm_instance_and_string_agree(algorithm in proptest::sample::select(Algorithm::variants().to_vec())) {
        let provider = HashArgumentProvider::default();
        let from_string = provider.get_algorithm_argument_value(Some(&args(json!([algorithm.as_str()]))), &Value::Null, None);
        let from_instance = provider.get_algorithm_argument_value(
            Some(&ArgumentIterator::new().with(0, algorithm)),
            &Value::Null,
            None,
        );
        prop_assert_eq!(from_string, Ok(algorithm));
        prop_assert_eq!(from_instance, Ok(algorithm));
    }

    #[test]
    fn prop_positive_integer_strings_coerce(length in 1u32..=u32::MAX) {
        let provider = ChunkArgumentProvider::default();
        let arguments = args(json!([length.to_string()]));
        prop_assert_eq!(
            provider.get_length_argument_value(Some(&arguments), &Value::Null, None),
            Ok(length as usize)
        );
    }

    #[test]
    fn prop_decimals_reject_signed_strings(decimals in 1u32..1000) {
        let provider = FormatNumberArgumentProvider::default();
        let arguments = args(json!([format!("-{decimals}")]));
        prop_assert!(provider.get_decimals_argument_value(Some(&arguments), &Value::Null, None).is_err());
    }

    #[test]
    fn prop_resolution_is_idempotent(raw in raw_arguments_strategy(), payload in raw_value_strategy()) {
        let arguments = args(raw);
        let context = ExtractionContext::new().with("ctx", payload.clone());

        let chunk = ChunkArgumentProvider::default();
        prop_assert_eq!(
            chunk.get_length_argument_value(Some(&arguments), &payload, Some(&context)),
            chunk.get_length_argument_value(Some(&arguments), &payload, Some(&context))
        );

        let trim = TrimArgumentProvider::default();
        prop_assert_eq!(
            trim.get_characters_argument_value(Some(&arguments), &payload, Some(&context)),
            trim.get_characters_argument_value(Some(&arguments), &payload, Some(&context))
        );

        let value_map = ValueMapArgumentProvider::default();
        prop_assert_eq!(
            value_map.get_value_map(Some(&arguments), &payload, Some(&context)),
            value_map.get_value_map(Some(&arguments), &payload, Some(&context))
        );

        let filter = FilterCompareArgumentProvider::default();
        prop_assert_eq!(
            filter.get_filter_comparisons(Some(&arguments), &payload, Some(&context)),
            filter.get_filter_comparisons(Some(&arguments), &payload, Some(&context))
        );
    }

    #[test]
    fn prop_errors_keep_diagnostics(raw in raw_arguments_strategy(), payload in raw_value_strategy()) {
        let arguments = args(raw);
        let provider = HashArgumentProvider::default();

        if let Err(err) = provider.get_algorithm_argument_value(Some(&arguments), &payload, None) {
            prop_assert_eq!(err.transformer.as_str(), "Hash");
            prop_assert_eq!(err.arguments.as_ref(), Some(&arguments));
            prop_assert_eq!(&err.payload, &payload);
            prop_assert!(!err.errors.is_empty());
        }
    }
}
