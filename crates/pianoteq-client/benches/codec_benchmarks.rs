//! Performance benchmarks for response decoding.
//!
//! Run with: cargo bench -p pianoteq-client

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pianoteq_client::codec::{fold_keys, parse_envelope};
use pianoteq_client::shape::decode;
use pianoteq_client::PresetInfo;
use serde_json::{Value, json};

fn preset_list(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "name": format!("Preset {i}"),
                    "bank": "",
                    "instr": "NY Steinway D",
                    "class": "Acoustic Piano",
                    "collection": "Steinway",
                    "license_status": "ok",
                    "tags": ["grand", "classical"],
                    "favourite": i % 7 == 0
                })
            })
            .collect(),
    )
}

/// Benchmark decoding of `getListOfPresets` results of different sizes.
fn bench_preset_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset_decode");

    for count in [10, 100, 1000].iter() {
        let result = preset_list(*count);
        group.bench_with_input(BenchmarkId::new("presets", count), &result, |b, result| {
            b.iter(|| {
                let presets: Vec<PresetInfo> =
                    decode("getListOfPresets", Some(black_box(result.clone()))).unwrap();
                presets
            });
        });
    }

    group.finish();
}

/// Benchmark key folding alone.
fn bench_fold_keys(c: &mut Criterion) {
    let result = preset_list(100);
    c.bench_function("fold_keys_100", |b| {
        b.iter(|| fold_keys(black_box(result.clone())));
    });
}

/// Benchmark envelope parsing of a raw body.
fn bench_parse_envelope(c: &mut Criterion) {
    let body = json!({"jsonrpc": "2.0", "result": preset_list(100), "id": 1}).to_string();
    c.bench_function("parse_envelope_100", |b| {
        b.iter(|| parse_envelope(black_box(&body)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_preset_decode,
    bench_fold_keys,
    bench_parse_envelope
);
criterion_main!(benches);
