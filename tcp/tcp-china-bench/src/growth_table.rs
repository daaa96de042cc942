// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;
use tcp_china_core::recovery::growth_table::HSTCP_AIMD;

pub fn benchmarks(c: &mut Criterion) {
    lookup(c);
}

#[inline(never)]
pub fn incremental(window: u32, index: usize) -> usize {
    let index = HSTCP_AIMD.advance_index_for(window, index);
    HSTCP_AIMD.retreat_index_for(window, index)
}

#[inline(never)]
pub fn search(window: u32) -> usize {
    HSTCP_AIMD.index_for(window)
}

fn lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_table/lookup");
    for window in [38, 1_000, 10_000, 50_000, 90_000] {
        let index = HSTCP_AIMD.index_for(window);

        group.bench_with_input(BenchmarkId::new("same", window), &window, |b, window| {
            b.iter(|| black_box(incremental(black_box(*window), black_box(index))));
        });
        group.bench_with_input(BenchmarkId::new("from_zero", window), &window, |b, window| {
            b.iter(|| black_box(incremental(black_box(*window), black_box(0))));
        });
        group.bench_with_input(BenchmarkId::new("search", window), &window, |b, window| {
            b.iter(|| black_box(search(black_box(*window))));
        });
    }
    group.finish();
}
