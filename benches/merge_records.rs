//! Measures completing sparse and full records against the baseline template.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use serde_json::json;
use wedcard::{BaselineTemplate, PartialWeddingRecord, domain::merge};

fn sparse() -> PartialWeddingRecord {
    serde_json::from_value(json!({
        "custom_url": "sarah-michael",
        "couple_name_1": "Sarah J.",
        "wedding_date": "2026-09-12",
    }))
    .unwrap()
}

fn full(baseline: &BaselineTemplate) -> PartialWeddingRecord {
    let mut partial = PartialWeddingRecord::from(baseline.record().clone());
    for i in 0..50 {
        partial
            .extra
            .insert(format!("faq_{i}"), json!({"question": i, "answer": "yes"}));
    }
    partial
}

fn merge_records(c: &mut Criterion) {
    let baseline = BaselineTemplate::standard();

    c.bench_function("merge sparse record", |b| {
        b.iter_batched(
            sparse,
            |found| black_box(merge(Some(found), &baseline)),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("merge full record", |b| {
        b.iter_batched(
            || full(&baseline),
            |found| black_box(merge(Some(found), &baseline)),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("merge nothing", |b| {
        b.iter(|| black_box(merge(None, &baseline)));
    });
}

criterion_group!(benches, merge_records);
criterion_main!(benches);
