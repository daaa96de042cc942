// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tcp_china_core::{
    limits::Limits,
    recovery::{simulation, ChinaCongestionController, CongestionController},
    window::{Window, MINIMUM_SLOW_START_THRESHOLD},
};

pub fn benchmarks(c: &mut Criterion) {
    on_ack(c);
    rounds(c);
}

fn fast_growth(congestion_window: u32) -> (ChinaCongestionController, Window) {
    let mut cc = ChinaCongestionController::new();
    let mut window = Limits::new().window();
    cc.init(&mut window);
    window.set_congestion_window(congestion_window);
    window.set_slow_start_threshold(MINIMUM_SLOW_START_THRESHOLD);
    (cc, window)
}

fn on_ack(c: &mut Criterion) {
    const ACKS: u64 = 1_000;

    let mut group = c.benchmark_group("controller/on_ack");
    group.throughput(Throughput::Elements(ACKS));
    for congestion_window in [100, 10_000, 80_000] {
        group.bench_with_input(
            BenchmarkId::new("fast_growth", congestion_window),
            &congestion_window,
            |b, congestion_window| {
                b.iter(|| {
                    let (mut cc, mut window) = fast_growth(*congestion_window);
                    for _ in 0..ACKS {
                        cc.record_sample(black_box(20_000), 1);
                        cc.on_ack(&mut window, black_box(1), true);
                    }
                    black_box(cc.on_congestion_event(&window))
                });
            },
        );
    }
    group.finish();
}

fn rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller/simulation");
    group.bench_function("loss_at_10000_and_9000", |b| {
        b.iter(|| {
            black_box(simulation::loss_at_10000_and_9000(
                ChinaCongestionController::new(),
                black_box(50),
            ))
        });
    });
    group.finish();
}
