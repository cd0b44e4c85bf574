// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use whorl::{Config, Direction, Forest, Pattern, Segment, SegmentId};
use whorl_raster::{Canvas, Stage};

/// A pattern that has been running long enough to have grown and pruned.
fn warmed_pattern(seed: u64, frames: usize) -> Pattern<SmallRng> {
    let mut pattern = Pattern::new(Config::for_frame(500.0, 500.0), SmallRng::seed_from_u64(seed));
    for _ in 0..frames {
        pattern.change();
        pattern.plan();
    }
    pattern
}

/// A random forest of `n` segments with correctly halved max radii.
fn gen_forest(n: usize, seed: u64) -> (Forest, Vec<SegmentId>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut forest = Forest::new();
    let mut ids: Vec<SegmentId> = Vec::with_capacity(n);
    for _ in 0..n {
        let parent = if ids.is_empty() || rng.gen_bool(0.05) {
            None
        } else {
            Some(ids[rng.gen_range(0..ids.len())])
        };
        let max_radius = parent.map_or(100.0, |p| forest.get(p).map_or(100.0, |s| s.max_radius() / 2.0));
        let segment = Segment::new(
            rng.gen_range(0.0..max_radius),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            Direction::random(&mut rng),
            max_radius,
        );
        ids.push(forest.insert(parent, segment));
    }
    (forest, ids)
}

fn bench_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern");
    for &warm in &[0usize, 600, 3_000] {
        let mut pattern = warmed_pattern(1, warm);
        group.bench_function(format!("change_plan_after_{warm}"), |b| {
            b.iter(|| {
                pattern.change();
                pattern.plan();
                black_box(pattern.complexity());
            });
        });
    }
    group.finish();
}

fn bench_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest");
    for &n in &[256usize, 1024, 4096] {
        let (forest, ids) = gen_forest(n, 2);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("depth_first_n{n}"), |b| {
            b.iter(|| black_box(forest.depth_first().len()));
        });
        group.bench_function(format!("splice_out_half_n{n}"), |b| {
            b.iter_batched(
                || forest.clone(),
                |mut forest| {
                    for id in ids.iter().step_by(2) {
                        forest.splice_out(*id);
                    }
                    black_box(forest.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");
    for &size in &[200u32, 400] {
        let mut stage = Stage::new(size, size, Config::default(), SmallRng::seed_from_u64(3));
        for _ in 0..300 {
            stage.tick();
        }
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_function(format!("tick_{size}"), |b| {
            b.iter(|| black_box(stage.tick().ink_count()));
        });
    }
    let (forest, _) = gen_forest(512, 4);
    group.bench_function("draw_forest_512", |b| {
        b.iter_batched(
            || Canvas::new(400, 400),
            |mut canvas| {
                for &root in forest.roots() {
                    forest.draw(root, &mut canvas, Point::new(200.0, 200.0), 0.0);
                }
                black_box(canvas.opaque_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_pattern, bench_forest, bench_raster);
criterion_main!(benches);
