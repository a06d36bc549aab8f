// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use noema::layout::{LayeredBackend, LayoutBackend, LayoutDirection};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.layered`
// - Case IDs must remain stable across refactors so results stay comparable
//   over time (e.g. `small`, `medium_wide`, `large_deep`).
fn benches_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.layered");

    for (case_id, case) in [
        ("small", fixtures::Case::Small),
        ("medium_wide", fixtures::Case::MediumWide),
        ("large_deep", fixtures::Case::LargeDeep),
    ] {
        let tree = fixtures::tree(case);
        let input = fixtures::layout_input(&tree, LayoutDirection::TopDown);
        group.throughput(Throughput::Elements(input.nodes.len() as u64));
        group.bench_function(case_id, move |b| {
            b.iter(|| {
                let layout = LayeredBackend.compute(black_box(&input)).expect("layout");
                black_box(layout.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benches_layout);
criterion_main!(benches);
