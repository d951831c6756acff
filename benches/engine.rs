use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilematch::core::{all_matches, matched, Board, Grid};

fn bench_board_new(c: &mut Criterion) {
    c.bench_function("board_new_8x8", |b| {
        b.iter(|| Board::new((8, 8), Some(black_box(12345))))
    });
}

fn bench_matched(c: &mut Criterion) {
    let board = Board::new((8, 8), Some(12345)).expect("valid shape");

    c.bench_function("matched_center_seed", |b| {
        b.iter(|| matched(board.grid(), black_box((4, 4))))
    });
}

fn bench_all_matches(c: &mut Criterion) {
    let board = Board::new((8, 8), Some(12345)).expect("valid shape");

    c.bench_function("all_matches_8x8", |b| {
        b.iter(|| all_matches(black_box(board.grid())))
    });
}

fn bench_attempt_swap(c: &mut Criterion) {
    let grid = Grid::from_rows(&[vec![1, 6, 1], vec![6, 1, 6], vec![1, 6, 1]]);
    let board = Board::from_grid(grid, 42).expect("valid shape");

    c.bench_function("attempt_swap_with_cascade", |b| {
        b.iter(|| {
            let mut probe = board.clone();
            probe.attempt_swap(black_box((1, 1)), black_box((0, 1)))
        })
    });
}

fn bench_possible_moves(c: &mut Criterion) {
    let board = Board::new((8, 8), Some(12345)).expect("valid shape");

    c.bench_function("possible_moves_8x8", |b| {
        b.iter(|| board.possible_moves().count())
    });
}

criterion_group!(
    benches,
    bench_board_new,
    bench_matched,
    bench_all_matches,
    bench_attempt_swap,
    bench_possible_moves
);
criterion_main!(benches);
