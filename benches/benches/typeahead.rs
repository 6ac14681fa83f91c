// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_typeahead::{Candidate, TypeAhead, TypeAheadConfig};

fn labels(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("Row {i:06}")).collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("typeahead/search");

    // The match is the last candidate, so every search scans the whole list.
    for len in [100usize, 1_000, 10_000] {
        let labels = labels(len);
        let candidates: Vec<_> = labels
            .iter()
            .enumerate()
            .map(|(ordinal, label)| Candidate::new(ordinal, label))
            .collect();
        let needle = format!("row {:06}", len - 1);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(
            BenchmarkId::new("full_prefix", len),
            &candidates,
            |b, candidates| {
                let mut typeahead = TypeAhead::new(TypeAheadConfig::default());
                b.iter(|| {
                    let mut found = None;
                    for ch in needle.chars() {
                        found = typeahead.on_char(ch, 0, candidates, found).or(found);
                    }
                    typeahead.cancel();
                    black_box(found)
                });
            },
        );

        // Repeating one character cycles through items starting with it.
        group.bench_with_input(
            BenchmarkId::new("cycle_first_char", len),
            &candidates,
            |b, candidates| {
                let mut typeahead = TypeAhead::new(TypeAheadConfig::default());
                let mut current = Some(0);
                b.iter(|| {
                    current = typeahead.on_char('r', 0, candidates, current).or(current);
                    black_box(current)
                });
            },
        );
    }

    group.finish();
}

fn bench_disabled_fallback(c: &mut Criterion) {
    let len = 1_000;
    let labels = labels(len);
    // Every row but the last is disabled: the enabled match is found last.
    let candidates: Vec<_> = labels
        .iter()
        .enumerate()
        .map(|(ordinal, label)| Candidate::new(ordinal, label).with_disabled(ordinal + 1 != len))
        .collect();

    c.bench_function("typeahead/disabled_fallback", |b| {
        let mut typeahead = TypeAhead::new(TypeAheadConfig::default());
        b.iter(|| {
            let found = typeahead.on_char('r', 0, &candidates, None);
            typeahead.cancel();
            black_box(found)
        });
    });
}

criterion_group!(benches, bench_search, bench_disabled_fallback);
criterion_main!(benches);
