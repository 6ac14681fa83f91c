// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_focus::{DefaultPolicy, FocusSpace, ListFocus, Navigation, WrapMode};
use understory_item_registry::{ItemDef, ItemKey, ItemRegistry};
use understory_virtual_list::KeyWindow;

fn bench_navigate_virtual(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus/navigate_virtual");
    let policy = DefaultPolicy {
        wrap: WrapMode::Wrap,
        skip_disabled: true,
    };

    // A large virtual window with a handful of registered rows; every other
    // registered row is disabled and skipped.
    for len in [1_000usize, 100_000] {
        let window = KeyWindow::from_keys((0..len).map(|i| ItemKey::from(format!("row-{i}"))));
        let mut registry = ItemRegistry::new();
        for i in 0..64 {
            let def = ItemDef::new(format!("row-{i}"))
                .with_item_pos(i)
                .with_disabled(i % 2 == 1);
            registry.register(def).unwrap();
        }
        let space = FocusSpace::new(&window, &registry, Some(len));

        group.bench_with_input(BenchmarkId::new("next", len), &space, |b, space| {
            let mut focus = ListFocus::new();
            b.iter(|| black_box(focus.navigate(&policy, Navigation::Next, space)));
        });

        group.bench_with_input(BenchmarkId::new("last", len), &space, |b, space| {
            let mut focus = ListFocus::new();
            b.iter(|| {
                focus.clear();
                black_box(focus.navigate(&policy, Navigation::Last, space))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_navigate_virtual);
criterion_main!(benches);
