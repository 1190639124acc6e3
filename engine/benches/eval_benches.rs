use criterion::{black_box, Bencher, Criterion, Fun};
use std::time::Duration;

use talon_core::tools::eval::Eval;
use talon_core::Board;

fn bench_100_evals(b: &mut Bencher, boards: &Vec<Board>) {
    b.iter(|| {
        #[allow(unused_variables)]
        let mut score: i64 = 0;
        for board in boards.iter() {
            score += black_box(Eval::eval_low(board)) as i64;
        }
    })
}

fn bench_engine_evaluations(c: &mut Criterion) {
    let boards: Vec<Board> = RAND_BOARD_NON_CHECKS_20
        .iter()
        .map(|b| Board::from_fen(b).unwrap())
        .collect();

    let full_evals = Fun::new("Static Evaluation", bench_100_evals);
    c.bench_functions("Engine Evaluations", vec![full_evals], boards);
}

criterion_group!(name = eval_benches;
     config = Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_millis(20));
    targets = bench_engine_evaluations
);

static RAND_BOARD_NON_CHECKS_20: [&str; 20] = [
    "3qkb1r/3ppp2/3r1np1/2Q4p/5P2/1P3B2/P1P1PP1P/R2NK2R b k - 0 22",
    "r3kb1r/1p1bpp2/1p3n1p/q2p2p1/8/PQ6/1P1NPPPP/R3KBNR w KQkq - 2 14",
    "r2qkbnr/pp2p1pp/2p1b3/3pNpB1/3P4/8/PP1NPPPP/R2QKB1R w KQkq - 2 8",
    "r1bqk2r/pppp3p/5b2/1P6/5p2/P5P1/1QP1P2P/RN2KB1R b KQkq - 2 16",
    "3rr3/2pkb3/2p1p3/p1Pn1p2/P1QP1P2/1P1KPP1p/7P/1R w - - 12 39",
    "r1bqkbnr/ppppppp1/n7/3P2p1/Q4P2/2P5/PP2P1PP/RN2KBNR b KQkq - 2 6",
    "3rk2r/pppb3p/2n1p3/1B6/3bP3/P4P2/3N2PP/4K2R b Kk - 0 22",
    "rn2kb1r/1ppqpbpp/5n2/p3Q3/8/PP1P4/1BPP1PPP/R2NKB1R b KQkq - 3 13",
    "r2qkbnr/ppp1Bppp/2n5/3p1b2/3P4/2N5/PPP1PPPP/R2QKBNR b KQkq - 0 4",
    "r3k1nr/pp1n1pbp/1qp1p1p1/6B1/P2PP1P1/1Pp2N2/2P2P2/R2QKB1R b KQkq - 0 13",
    "2r1r3/3k4/1qpn1p2/8/RP1pP3/3R1PPp/1p5P/1N4K w - - 2 39",
    "r1bqkb1r/ppp1pppp/2n5/3p2B1/P2Pn3/1P6/2P1PPPP/RN1QKBNR w KQkq - 2 5",
    "r2nk2r/1p2bppp/p3p3/8/P4nB1/1P1P2N1/2QN1PbP/R1B1K1R b Qkq - 7 21",
    "2r1k2r/pp1n2p1/5p1p/2P5/4PP2/8/PPb3PP/4KBNR b Kk - 0 19",
    "rkb4r/pp1pnppp/2npp3/8/P5P1/1P1N1N1P/3PPP2/2RQKB1R w K - 4 20",
    "7r/3b3p/Q2b1k2/2pq2p1/5p2/2P5/PP1NBPPP/3R1KR w - - 4 22",
    "r2qk1nr/1pp2pBp/8/3p4/pb1P2b1/2N5/PPP1PPPP/R2QKB1R b KQkq - 0 9",
    "8/5k1p/2p3p1/1p1p4/p4b2/5B1P/8/5K b - - 4 38",
    "2kr4/2pnr3/3p4/1p1P1B2/P3P2P/2K4P/2R5/R w - - 0 42",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
];
