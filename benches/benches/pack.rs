// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coinpack_chart::{CoinNode, PackLayout};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

const OUTPUTS: &str = include_str!("../../demos/data/outputs.json");
const SCREEN: Size = Size::new(390.0, 844.0);

/// A wallet with `groups` accounts of `per_group` outputs each.
fn wallet(groups: u32, per_group: u32) -> CoinNode {
    let mut accounts = Vec::new();
    let mut next: u32 = 2;
    for g in 0..groups {
        let account = next;
        next += 1;
        let mut outputs = Vec::new();
        for o in 0..per_group {
            let value = f64::from(1 + (g * 31 + o * 17) % 997);
            outputs.push(CoinNode::leaf(next, "output", value));
            next += 1;
        }
        accounts.push(CoinNode::group(account, "account", outputs));
    }
    CoinNode::group(1, "wallet", accounts)
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart/pack");
    let layout = PackLayout::new(SCREEN);

    let outputs: CoinNode = serde_json::from_str(OUTPUTS).unwrap();
    group.bench_function("spendable_outputs", |b| {
        b.iter(|| layout.pack(black_box(&outputs)).unwrap());
    });

    for (groups, per_group) in [(4u32, 16u32), (16, 64), (32, 256)] {
        let tree = wallet(groups, per_group);
        let nodes = tree.count();
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("wallet", nodes), &tree, |b, tree| {
            b.iter(|| layout.pack(black_box(tree)).unwrap());
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let chart = PackLayout::new(SCREEN).pack(&wallet(16, 64)).unwrap();
    let probes: Vec<Point> = chart.leaves().map(|c| c.circle.center).collect();
    c.bench_function("chart/hit_test", |b| {
        b.iter(|| {
            for &p in &probes {
                black_box(chart.hit_test(p));
            }
        });
    });
}

criterion_group!(benches, bench_pack, bench_hit_test);
criterion_main!(benches);
