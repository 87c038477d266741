use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use sudoku_sat::sat::dpll::Dpll;
use sudoku_sat::sudoku::board::{EXAMPLE_FOUR, EXAMPLE_NINE};
use sudoku_sat::sudoku::generator::{Generator, GeneratorConfig, RemovalOrder};
use sudoku_sat::sudoku::solver::{PuzzleFormula, solve_boards};
use sudoku_sat::sudoku::{Board, Size};

fn bench_solve(c: &mut Criterion) {
    let nine = vec![Board::try_from(&EXAMPLE_NINE).unwrap()];
    let pair = vec![
        Board::try_from(&EXAMPLE_FOUR).unwrap(),
        Board::empty(Size::new(2)),
    ];

    c.bench_function("sudoku - 9x9 formula", |b| {
        b.iter(|| black_box(PuzzleFormula::build(&nine).unwrap()))
    });

    c.bench_function("sudoku - 9x9 solve", |b| {
        b.iter(|| {
            let mut boards = nine.clone();
            black_box(solve_boards::<Dpll>(&mut boards).unwrap());
        })
    });

    c.bench_function("sudoku - 4x4 pair solve", |b| {
        b.iter(|| {
            let mut boards = pair.clone();
            black_box(solve_boards::<Dpll>(&mut boards).unwrap());
        })
    });
}

fn generator(order: usize, boards: usize, removal_order: RemovalOrder, seed: u64) -> Generator<Dpll> {
    Generator::new(GeneratorConfig {
        size: Size::new(order),
        boards,
        removal_order,
        seed: Some(seed),
    })
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sudoku - generation");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    group.bench_function("9x9 single", |b| {
        b.iter(|| black_box(generator(3, 1, RemovalOrder::Alternating, 42).generate()))
    });

    group.bench_function("4x4 pair", |b| {
        b.iter(|| black_box(generator(2, 2, RemovalOrder::Alternating, 42).generate()))
    });

    group.bench_function("4x4 pair - random order", |b| {
        b.iter(|| black_box(generator(2, 2, RemovalOrder::Random, 42).generate()))
    });

    group.finish();
}

criterion_group!(benches, bench_solve, bench_generate);
criterion_main!(benches);
