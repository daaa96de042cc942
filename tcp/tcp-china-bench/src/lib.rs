// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use criterion::Criterion;

mod controller;
mod growth_table;

pub fn benchmarks(c: &mut Criterion) {
    controller::benchmarks(c);
    growth_table::benchmarks(c);
}
