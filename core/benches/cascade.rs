use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use evade_core::*;

fn generate(c: &mut Criterion) {
    c.bench_function("generate difficult", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(generate_random_layout(10, 15, 35, seed).unwrap())
        })
    });
}

fn cascade(c: &mut Criterion) {
    let mines: MineSet = [(0, 0)].into_iter().collect();
    let grid = Grid::from_mines((10, 15), &mines).unwrap();

    c.bench_function("cascade nearly empty board", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| black_box(reveal(&mut grid, (9, 14))),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, generate, cascade);
criterion_main!(benches);
