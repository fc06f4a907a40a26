// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_bsp::{Aabb2D, BspTree, Depth, ItemIndex, Partition};

const WORLD: f64 = 4096.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_rects(n: usize, max_size: f64, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.next_f64() * WORLD;
            let y = rng.next_f64() * WORLD;
            let w = 1.0 + rng.next_f64() * max_size;
            let h = 1.0 + rng.next_f64() * max_size;
            Aabb2D::from_xywh(x, y, w, h)
        })
        .collect()
}

fn build_items(rects: &[Aabb2D<f64>], depth: Depth) -> ItemIndex<f64> {
    let bounds = Aabb2D::new(0.0, 0.0, WORLD, WORLD);
    let mut items = ItemIndex::with_options(bounds, Partition::Both, depth);
    for (id, r) in rects.iter().enumerate() {
        items.insert(id, *r);
    }
    items
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bsp_build");
    for &n in &[1_000_usize, 10_000] {
        let rects = gen_rects(n, 64.0, 7);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("item_index_insert_{n}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| black_box(build_items(&rects, Depth::Auto)),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("tree_insert_leaf_{n}"), |b| {
            b.iter(|| {
                let mut tree = BspTree::new();
                tree.create(n, Depth::Auto);
                tree.init(Aabb2D::new(0.0, 0.0, WORLD, WORLD), Partition::Both);
                for (id, r) in rects.iter().enumerate() {
                    tree.insert_leaf(*r, id);
                }
                black_box(tree)
            });
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bsp_query");
    let rects = gen_rects(10_000, 64.0, 11);
    let queries = gen_rects(256, 256.0, 13);

    for depth in [Depth::Fixed(4), Depth::Auto, Depth::Fixed(12)] {
        let mut items = build_items(&rects, depth);
        let label = format!("{depth:?}");
        group.bench_function(format!("query_rect_{label}"), |b| {
            b.iter(|| {
                let mut hits = 0;
                for q in &queries {
                    items.visit_rect(*q, |_, _| hits += 1);
                }
                black_box(hits)
            });
        });
        group.bench_function(format!("query_point_{label}"), |b| {
            b.iter(|| {
                let mut hits = 0;
                for q in &queries {
                    items.visit_point(q.min_x, q.min_y, |_, _| hits += 1);
                }
                black_box(hits)
            });
        });
    }

    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            let mut hits = 0;
            for q in &queries {
                hits += rects.iter().filter(|r| r.overlaps(q)).count();
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let rects = gen_rects(10_000, 64.0, 17);
    let targets = gen_rects(10_000, 64.0, 19);
    c.bench_function("bsp_update_all", |b| {
        b.iter_batched(
            || build_items(&rects, Depth::Auto),
            |mut items| {
                for (id, r) in targets.iter().enumerate() {
                    items.update(id, *r);
                }
                black_box(items)
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_build, bench_query, bench_update);
criterion_main!(benches);
