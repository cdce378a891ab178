// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coinpack_gesture::{
    GestureComposer, GestureEvent, GestureKind, GestureStart, PanDelta, PinchUpdate,
};
use coinpack_matrix::Matrix4;
use coinpack_state::SharedTransform;
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");
    let pivot = Point::new(120.0, 80.0);

    group.bench_function("scale_about", |b| {
        b.iter(|| Matrix4::scale_about(black_box(1.7), black_box(1.7), black_box(pivot)));
    });
    group.bench_function("mul", |b| {
        let lhs = Matrix4::rotate_z_about(0.3, pivot);
        let rhs = Matrix4::translate(Vec2::new(12.0, -4.0));
        b.iter(|| black_box(lhs) * black_box(rhs));
    });
    group.bench_function("map_point", |b| {
        let m = Matrix4::scale_about(2.0, 2.0, pivot) * Matrix4::rotate_z(0.5);
        b.iter(|| m.map_point(black_box(Point::new(10.0, 20.0))));
    });
    group.finish();
}

fn pinch_sequence(changes: usize) -> Vec<GestureEvent> {
    let focal = Point::new(195.0, 422.0);
    let mut events = vec![
        GestureEvent::Begin(GestureStart::Pinch { focal }),
        GestureEvent::Begin(GestureStart::Pan),
    ];
    for i in 0..changes {
        let scale = 1.0 + i as f64 / changes as f64;
        events.push(GestureEvent::Change(PinchUpdate::new(focal, scale).into()));
        events.push(GestureEvent::Change(PanDelta::new(1.0, 1.0).into()));
    }
    events.push(GestureEvent::End(GestureKind::Pinch));
    events
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/replay");

    // Pinch recomputes from its snapshot on every change, pan composes
    // incrementally; both are a handful of 4x4 products per event.
    for changes in [16usize, 256, 4_096] {
        let events = pinch_sequence(changes);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::new("pinch_race", changes), &events, |b, events| {
            b.iter_batched(
                || GestureComposer::new(SharedTransform::new()),
                |mut composer| {
                    for event in events {
                        black_box(composer.handle(*event));
                    }
                    composer.end_sequence();
                    black_box(composer.transform().get());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("pinch_race_observed", changes),
            &events,
            |b, events| {
                b.iter_batched(
                    || {
                        let transform = SharedTransform::new();
                        transform.subscribe(|m| {
                            black_box(m.to_column_major());
                        });
                        GestureComposer::new(transform)
                    },
                    |mut composer| {
                        for event in events {
                            black_box(composer.handle(*event));
                        }
                        composer.end_sequence();
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_matrix, bench_replay);
criterion_main!(benches);
