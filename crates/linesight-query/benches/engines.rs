// SPDX-License-Identifier: Apache-2.0

use chrono::TimeDelta;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linesight_model::parse_instant;
use linesight_query::{
    list_inspections, summarize, trend, BaseFilter, InspectionFilter, QueryLimits,
};
use linesight_store::fixtures::{seed_dataset, FIXTURE_ANCHOR};
use linesight_store::{Dataset, StoreSnapshot};

fn large_dataset(copies: usize) -> Dataset {
    let anchor = parse_instant(FIXTURE_ANCHOR).expect("anchor");
    let mut dataset = seed_dataset(anchor);
    let template = dataset.inspections.clone();
    for copy in 1..copies {
        for event in &template {
            let mut event = event.clone();
            event.id = format!("{}-{copy}", event.id);
            event.captured_at -= TimeDelta::minutes(copy as i64);
            dataset.inspections.push(event);
        }
    }
    dataset
}

fn bench_engines(c: &mut Criterion) {
    let snapshot = StoreSnapshot::from_dataset(large_dataset(2_000)).expect("snapshot");
    let limits = QueryLimits::default();
    let l1 = BaseFilter {
        line: Some("L1".to_string()),
        ..BaseFilter::default()
    };
    let listing = InspectionFilter::from(l1.clone());

    c.bench_function("summarize_line", |b| {
        b.iter(|| summarize(black_box(&snapshot), black_box(&l1), black_box(&limits)))
    });
    c.bench_function("trend_all", |b| {
        b.iter(|| trend(black_box(&snapshot), black_box(&BaseFilter::default())))
    });
    c.bench_function("list_first_page", |b| {
        b.iter(|| {
            list_inspections(
                black_box(&snapshot),
                black_box(&listing),
                None,
                black_box(&limits),
            )
        })
    });
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
