use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pairlink_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn level_board(seed: u64, piece_types: PieceType) -> Board {
    RandomBoardGenerator::new(seed)
        .generate(BoardConfig::new(10, 10, piece_types))
        .unwrap()
}

fn bench_can_connect(c: &mut Criterion) {
    let board = level_board(12345, 24);
    let pairs: Vec<(Point, Point)> = board
        .active_tiles()
        .flat_map(|a| {
            board
                .active_tiles()
                .filter(move |b| b.kind == a.kind && b.pos > a.pos)
                .map(move |b| (a.pos, b.pos))
        })
        .collect();

    c.bench_function("can_connect_all_pairs_10x10", |b| {
        b.iter(|| {
            for &(from, to) in &pairs {
                black_box(can_connect(black_box(&board), from, to));
            }
        })
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let board = level_board(777, 24);

    c.bench_function("find_hint_10x10", |b| {
        b.iter(|| find_hint(black_box(&board)))
    });

    let small = Board::from_layout(&["abcd", "badc", "cdab", "dcba"]).unwrap();
    c.bench_function("find_hint_4x4", |b| {
        b.iter(|| find_hint(black_box(&small)))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let board = level_board(42, 24);
    let mut rng = SmallRng::seed_from_u64(42);

    c.bench_function("shuffle_until_solvable_10x10", |b| {
        b.iter(|| shuffle_until_solvable(black_box(&board), DEFAULT_MAX_SHUFFLE_ATTEMPTS, &mut rng))
    });
}

criterion_group!(benches, bench_can_connect, bench_find_hint, bench_shuffle);
criterion_main!(benches);
