// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hatchview_input::ViewportController;
use hatchview_viewport::{ViewportConfig, ViewportTransform};
use kurbo::{Point, Rect, Size, Vec2};
use std::time::Duration;

fn viewport() -> ViewportTransform {
    let mut vp = ViewportTransform::new(Size::new(1920.0, 1080.0), ViewportConfig::default())
        .expect("default config is valid");
    vp.set_content_bounds(Rect::new(-50_000.0, -50_000.0, 50_000.0, 50_000.0))
        .expect("bounds are not degenerate");
    vp
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/convert");
    let vp = viewport();
    let points: Vec<Point> = (0..1_024)
        .map(|i| Point::new(f64::from(i % 64) * 30.0, f64::from(i / 64) * 67.5))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("screen_to_world", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(vp.screen_to_world(black_box(p)));
            }
        });
    });
    group.bench_function("world_to_screen_rect", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(vp.world_to_screen_rect(Rect::from_origin_size(p, (10.0, 10.0))));
            }
        });
    });
    group.finish();
}

fn bench_pointer_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/pointer_stream");
    // One second of 120 Hz pointer-move ticks.
    let ticks: Vec<Point> = (0..120)
        .map(|i| Point::new(400.0 + f64::from(i) * 2.0, 300.0 - f64::from(i)))
        .collect();
    group.throughput(Throughput::Elements(ticks.len() as u64));

    group.bench_function("drag_pan", |b| {
        b.iter_batched(
            || (viewport(), ViewportController::default()),
            |(mut vp, mut input)| {
                input.pointer_down(ticks[0]).expect("finite");
                for &p in &ticks {
                    input.pointer_move(&mut vp, p).expect("finite");
                }
                input.pointer_up();
                black_box(vp.offset());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("drag_pan_batched_with_listener", |b| {
        b.iter_batched(
            || {
                let mut vp = viewport();
                vp.subscribe(|state| {
                    black_box(state.revision);
                });
                (vp, ViewportController::default())
            },
            |(mut vp, mut input)| {
                vp.batch(|vp| {
                    input.pointer_down(ticks[0]).expect("finite");
                    for &p in &ticks {
                        input.pointer_move(vp, p).expect("finite");
                    }
                    input.pointer_up();
                });
                black_box(vp.revision());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("wheel_zoom", |b| {
        b.iter_batched(
            || (viewport(), ViewportController::default()),
            |(mut vp, mut input)| {
                for (i, &p) in ticks.iter().enumerate() {
                    let delta = if i % 2 == 0 { -40.0 } else { 35.0 };
                    input.wheel(&mut vp, p, delta).expect("finite");
                }
                black_box(vp.zoom());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("pan_clamped", |b| {
        b.iter_batched(
            viewport,
            |mut vp| {
                for i in 0..120 {
                    let d = if i % 2 == 0 { 5_000.0 } else { -7_500.0 };
                    vp.pan(Vec2::new(d, -d)).expect("finite");
                }
                black_box(vp.offset());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    c.bench_function("viewport/fit_content", |b| {
        b.iter_batched(
            viewport,
            |mut vp| {
                vp.fit_content(black_box(0.9)).expect("visible canvas");
                black_box(vp.zoom());
            },
            BatchSize::SmallInput,
        );
    });
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_conversions, bench_pointer_stream, bench_fit
}
criterion_main!(benches);
