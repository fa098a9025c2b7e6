//! Benchmarks for the tile-swap solver.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tileswap::{
    Board, Evaluation, Heuristic, MisplacedTiles, MoveRule, SearchConfig, Solver, TaxiDistance,
};

const EIGHT_PUZZLE: &str = "8 1 3\n4 0 2\n7 6 5";
const EIGHT_GOAL: &str = "1 2 3\n4 5 6\n7 8 0";
const TYPED_PUZZLE: &str = "1 R 2\nG 3 R\n4 G 5";

fn board(text: &str) -> Board {
    Board::from_text(text).expect("benchmark board parses")
}

/// Benchmark A* with taxi distance on an 8-puzzle.
fn bench_astar_taxi(c: &mut Criterion) {
    let initial = board(EIGHT_PUZZLE);
    let goal = board(EIGHT_GOAL);
    let config = SearchConfig::new(Evaluation::AStar, MoveRule::Blank);

    c.bench_function("astar_taxi_8puzzle", |b| {
        b.iter(|| {
            let mut solver =
                Solver::new(initial.clone(), goal.clone(), TaxiDistance::new(&goal), config)
                    .expect("valid configuration");
            black_box(solver.solve())
        })
    });
}

/// Benchmark uniform-cost search, which ignores the heuristic.
fn bench_uniform_cost(c: &mut Criterion) {
    let initial = board(EIGHT_PUZZLE);
    let goal = board(EIGHT_GOAL);
    let config = SearchConfig::new(Evaluation::UniformCost, MoveRule::Blank);

    let mut group = c.benchmark_group("uniform");
    group.sample_size(10);
    group.bench_function("uniform_8puzzle", |b| {
        b.iter(|| {
            let mut solver =
                Solver::new(initial.clone(), goal.clone(), MisplacedTiles::new(&goal), config)
                    .expect("valid configuration");
            black_box(solver.solve())
        })
    });
    group.finish();
}

/// Benchmark the typed swap rule with a derived goal.
fn bench_typed(c: &mut Criterion) {
    let initial = board(TYPED_PUZZLE);
    let goal = initial.sorted();
    let config = SearchConfig::new(Evaluation::AStar, MoveRule::Typed);

    c.bench_function("astar_typed_3x3", |b| {
        b.iter(|| {
            let mut solver =
                Solver::new(initial.clone(), goal.clone(), TaxiDistance::new(&goal), config)
                    .expect("valid configuration");
            black_box(solver.solve())
        })
    });
}

/// Benchmark a single heuristic evaluation.
fn bench_taxi_estimate(c: &mut Criterion) {
    let initial = board(EIGHT_PUZZLE);
    let heuristic = TaxiDistance::new(&board(EIGHT_GOAL));

    c.bench_function("taxi_estimate", |b| {
        b.iter(|| heuristic.estimate(black_box(&initial)))
    });
}

criterion_group!(
    benches,
    bench_astar_taxi,
    bench_uniform_cost,
    bench_typed,
    bench_taxi_estimate
);
criterion_main!(benches);
