use cdbj_sudoku::puzzle::{EXAMPLE_FOUR, EXAMPLE_NINE};
use cdbj_sudoku::solver::board::Board;
use cdbj_sudoku::solver::search::{Engine, solve_board};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_four(c: &mut Criterion) {
    let board = Board::new(2, &EXAMPLE_FOUR).unwrap();

    c.bench_function("sudoku 4x4", |b| {
        b.iter(|| {
            let solved = solve_board(board.clone());
            black_box(solved)
        })
    });
}

fn bench_nine(c: &mut Criterion) {
    let board = Board::new(3, &EXAMPLE_NINE).unwrap();

    c.bench_function("sudoku 9x9", |b| {
        b.iter(|| {
            let solved = solve_board(board.clone());
            black_box(solved)
        })
    });
}

fn bench_forced_only(c: &mut Criterion) {
    let board = Board::new(3, &EXAMPLE_NINE).unwrap();

    c.bench_function("sudoku 9x9 - forced assignments", |b| {
        b.iter(|| {
            let mut engine = Engine::new(board.clone());
            let out = engine.propagate_singles();
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_four, bench_nine, bench_forced_only);
criterion_main!(benches);
