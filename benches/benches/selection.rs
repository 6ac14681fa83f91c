// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_selection::Selection;
use understory_virtual_list::KeyWindow;

fn window(len: u32) -> KeyWindow<u32> {
    KeyWindow::from_keys(0..len)
}

fn bench_extend_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/extend_range");

    // Shift-click from the top to the bottom of a window: one hashed lookup
    // per end, then a scan of the range against the current selection.
    for len in [128u32, 512, 2_048] {
        let window = window(len);
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("whole_window", len), &window, |b, window| {
            b.iter_batched(
                || {
                    let mut sel = Selection::new();
                    sel.select_only(0);
                    sel
                },
                |mut sel| {
                    sel.extend_range(len - 1, window);
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });

        // Extending again over an already selected range changes nothing.
        group.bench_with_input(BenchmarkId::new("no_op", len), &window, |b, window| {
            let mut sel = Selection::new();
            sel.select_only(0);
            sel.extend_range(len - 1, window);
            b.iter(|| black_box(sel.extend_range(len - 1, window)));
        });
    }

    group.finish();
}

fn bench_select_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/select_all");

    for len in [128u32, 512, 2_048] {
        let window = window(len);
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::from_parameter(len), &window, |b, window| {
            b.iter_batched(
                Selection::<u32>::new,
                |mut sel| {
                    sel.select_all(window);
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/toggle");

    // Ctrl-click in and out of a large selection.
    for len in [128u32, 2_048] {
        let mut sel = Selection::new();
        sel.replace_with(0..len);
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                sel.toggle(black_box(len / 2));
                sel.toggle(black_box(len / 2));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extend_range, bench_select_all, bench_toggle);
criterion_main!(benches);
