use criterion::{black_box, Criterion};
use std::time::Duration;

use talon_core::Board;
use talon_engine::engine::{Engine, RunSearchArg};
use talon_engine::{Limits, StopSignal};

fn play_n_moves(depth: u8, plies: u32) {
    let mut engine = Engine::init(16);
    let mut board = Board::start_pos();
    for _ in 0..plies {
        let arg = RunSearchArg {
            board: board.clone(),
            limits: Limits::default(),
            max_depth: depth,
            stop: StopSignal::new(),
        };
        let (handle, rx) = engine.run_search(arg);
        for _info in rx.iter() {}
        let result = handle.join().expect("search worker panicked");
        if let Some(mv) = black_box(result.best_move) {
            board.apply_move(mv);
        } else {
            break;
        }
    }
}

fn bench_multimove(c: &mut Criterion) {
    c.bench_function("3 moves at depth 4", |b| b.iter(|| play_n_moves(4, 3)));
    c.bench_function("3 moves at depth 5", |b| b.iter(|| play_n_moves(5, 3)));
}

criterion_group!(name = search_multimove;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_millis(20));
    targets = bench_multimove
);
