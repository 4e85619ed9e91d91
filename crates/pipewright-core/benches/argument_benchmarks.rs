//! Benchmarks for argument resolution and pipeline execution
//!
//! These benchmarks cover the hot paths a pipeline hits once per stage:
//! scalar provider getters, extraction expansion and the compound
//! assemblers.
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pipewright_core::provider::{FilterCompareArgumentProvider, HashArgumentProvider, ValueMapArgumentProvider};
use pipewright_core::{
    ArgumentIterator, ArgumentKey, ArgumentProvider, DefaultArgumentProvider, ExtractionContext, Pipeline,
    PipelineConfig, TransformerRegistry,
};
use serde_json::{json, Value};

fn args(raw: Value) -> ArgumentIterator {
    ArgumentIterator::from_value(&raw).unwrap()
}

fn create_payload() -> Value {
    json!({
        "user": {
            "name": "Ada",
            "salt": "pepper",
            "roles": ["admin", "editor"]
        },
        "settings": {"algorithm": "sha256"}
    })
}

fn create_large_listing() -> Value {
    let items: Vec<Value> = (0..1000)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Item {}", i % 250),
                "stock": i % 7,
                "price": (i as f64) * 1.5 + 10.0
            })
        })
        .collect();
    Value::Array(items)
}

fn bench_scalar_getters(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_getters");
    let provider = HashArgumentProvider::default();
    let payload = create_payload();

    let test_cases = vec![
        ("literal", json!(["sha256", "pepper"])),
        ("payload_extraction", json!(["$settings.algorithm", "$user.salt"])),
        ("unrecognised", json!(["sha9-999"])),
    ];

    for (name, raw) in test_cases {
        let arguments = args(raw);
        group.bench_with_input(BenchmarkId::new("hash_algorithm", name), &arguments, |b, arguments| {
            b.iter(|| {
                let result = provider.get_algorithm_argument_value(Some(black_box(arguments)), &payload, None);
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_extraction_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction_expansion");
    let provider = DefaultArgumentProvider::default();
    let payload = create_payload();
    let context = ExtractionContext::new().with("config", json!({"limits": {"words": 12}}));
    let key = ArgumentKey::Index(0);

    let test_cases = vec![
        ("literal", json!(["plain"])),
        ("shallow", json!(["$settings"])),
        ("nested_index", json!(["$user.roles.1"])),
        ("context", json!(["$config::limits.words"])),
        ("missing", json!(["$user.email"])),
    ];

    for (name, raw) in test_cases {
        let arguments = args(raw);
        group.bench_with_input(BenchmarkId::new("expand", name), &arguments, |b, arguments| {
            b.iter(|| {
                let result = provider.get_argument_value_with_extraction_expansion(
                    Some(black_box(arguments)),
                    &key,
                    &payload,
                    Some(&context),
                );
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_compound_assemblers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compound_assemblers");
    let payload = create_payload();

    let value_map = ValueMapArgumentProvider::default();
    for size in [4usize, 64] {
        let map: serde_json::Map<String, Value> = (0..size)
            .map(|i| (format!("key{i}"), json!(format!("value {i}"))))
            .collect();
        let arguments = args(json!([Value::Object(map), false, true]));
        group.bench_with_input(BenchmarkId::new("value_map", size), &arguments, |b, arguments| {
            b.iter(|| {
                let result = value_map.get_value_map(Some(black_box(arguments)), &payload, None);
                black_box(result)
            })
        });
    }

    let filter_compare = FilterCompareArgumentProvider::default();
    for size in [4usize, 64] {
        let comparisons: Vec<Value> = (0..size).map(|i| json!(["$stock", "gte", i, i % 2 == 0])).collect();
        let arguments = args(Value::Array(comparisons));
        group.bench_with_input(BenchmarkId::new("filter_compare", size), &arguments, |b, arguments| {
            b.iter(|| {
                let result = filter_compare.get_filter_comparisons(Some(black_box(arguments)), &payload, None);
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let registry = TransformerRegistry::with_builtins(DefaultArgumentProvider::shared());
    let config = PipelineConfig::from_json_str(
        r#"{
            "stages": [
                {"transformer": "FilterCompare", "arguments": [["$stock", "gt", 3]]},
                {"transformer": "MapProperty", "arguments": ["name"]},
                {"transformer": "Unique"},
                {"transformer": "Sort"},
                {"transformer": "Join", "arguments": [", "]}
            ]
        }"#,
    )
    .unwrap();
    let pipeline = Pipeline::from_config(&config, &registry).unwrap();
    let data = create_large_listing();

    group.bench_function("large_listing", |b| {
        b.iter(|| {
            let result = pipeline.execute(black_box(&data), None);
            black_box(result)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_getters,
    bench_extraction_expansion,
    bench_compound_assemblers,
    bench_pipeline
);
criterion_main!(benches);
