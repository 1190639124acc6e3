use criterion::{black_box, Bencher, Criterion};

use talon_core::{Board, MoveList, Player};

lazy_static! {
    pub static ref RAND_BOARDS: Vec<Board> =
        RAND_BOARD_FENS.iter().map(|b| Board::from_fen(b).unwrap()).collect();
}

fn bench_board_100_clone(c: &mut Criterion) {
    c.bench_function("clone 100 boards", |b: &mut Bencher| {
        b.iter(|| {
            for board in RAND_BOARDS.iter() {
                black_box(board.shallow_clone());
            }
        })
    });
}

fn bench_find_king(c: &mut Criterion) {
    c.bench_function("find king square, 100 boards", |b: &mut Bencher| {
        b.iter(|| {
            for board in RAND_BOARDS.iter() {
                black_box(board.king_sq(Player::Black));
            }
        })
    });
}

fn bench_apply_100_move(c: &mut Criterion) {
    let board_move: Vec<(Board, talon_core::BitMove)> = RAND_BOARDS
        .iter()
        .map(|board| {
            let moves: Vec<talon_core::BitMove> = MoveList::into(board.generate_moves());
            (board.parallel_clone(), moves[0])
        })
        .collect();

    c.bench_function("apply 100 moves", |b: &mut Bencher| {
        b.iter(|| {
            for (board, mv) in board_move.iter() {
                let mut clone = black_box(board).parallel_clone();
                black_box(clone.apply_move(*mv));
            }
        })
    });
}

fn bench_undo_100_move(c: &mut Criterion) {
    let board_move: Vec<(Board, talon_core::BitMove)> = RAND_BOARDS
        .iter()
        .map(|board| {
            let moves: Vec<talon_core::BitMove> = MoveList::into(board.generate_moves());
            let mut clone = board.parallel_clone();
            clone.apply_move(moves[0]);
            (clone, moves[0])
        })
        .collect();

    c.bench_function("undo 100 moves", |b: &mut Bencher| {
        b.iter(|| {
            for (board, _mv) in board_move.iter() {
                let mut clone = black_box(board).parallel_clone();
                black_box(clone.undo_move());
            }
        })
    });
}

criterion_group!(name = board_benches;
    config = Criterion::default();
    targets = bench_board_100_clone, bench_find_king, bench_apply_100_move, bench_undo_100_move
);

static RAND_BOARD_FENS: [&str; 30] = [
    "3qkb1r/ppp2ppp/4bn2/8/4P3/1PNB1K1P/P1PP1PP1/R6R b k - 0 13",
    "4k1n1/3b2p1/8/1p2p3/1Q1n3r/4P3/5P1P/q3NK1R b - - 0 28",
    "rn2k3/pp1qPppr/5n2/1b2B3/8/4NP2/3NP1PP/R2K1B1R b q - 0 23",
    "rnbqkbnr/pp1ppp1p/2p5/3N2p1/8/7P/PPPPPPP1/R1BQKBNR b KQkq - 0 3",
    "3rkb1r/pp1bpppp/8/3P4/4N3/2Nq4/PP3PPP/3RK2R b Kk - 3 15",
    "3qkb1r/2pn1ppp/p1p1p3/3p1Q2/2rP4/P3P3/1PPBNPPP/1R3RK w k - 0 14",
    "2r1kb1r/1p2nppp/p2pb3/3p2P1/8/PPN2N1P/2PBBP2/R2QK2R w KQ - 3 18",
    "7r/Q5pp/3b1pk1/8/3Pq3/8/1P1PB1PP/2B1K2n w - - 2 24",
    "rq3b1r/p2Bpk1p/1p3p2/2pR4/2P1n2B/PN3NP1/4PP1P/4K2R w K - 1 21",
    "7r/8/p5rp/P1p1k3/2Pbpp2/8/2R2PPP/1R4K w - - 0 39",
    "r2qkbnr/1pp1pppp/p1n5/3N2B1/2PP2b1/5N2/PP2PPPP/R2QKB1R b KQkq c3 0 6",
    "r1bqkbnr/ppp2ppp/2np4/4p3/4PQ2/2NP4/PPP1NPPP/R1B1KB1R w KQkq e6 0 8",
    "r3kbnr/ppp2pp1/4p3/3pqb2/8/PPN1P3/4K1PP/Q4B1R w kq - 0 14",
    "r3kbnr/pp2ppp1/2p5/3p4/1q4N1/4PP2/3N2PP/4KB1R b kq - 2 18",
    "r1bqkb1r/pp2pp2/2p2n2/6Q1/7p/2N4P/PP1B1PP1/R3KBNR w KQkq - 0 14",
    "3r4/3p1p2/2pk1bp1/1p1p4/p6p/P1PB1N2/1P1N1PPP/4RRK b - - 3 25",
    "r4bnr/2B1pk1p/1N3p2/p2b2p1/2pP4/4P3/PPP2PPP/RQ3RK b - - 0 18",
    "5r1r/1pp2pkp/p5p1/3nn3/6q1/P7/4NR1P/3RK b - - 3 29",
    "8/p1p2p1r/3kb1p1/8/6p1/PP2P2P/2PpKP2/6q w - - 0 30",
    "1k6/1p1n4/p6p/4P3/2P5/1R6/5K1P/4R b - - 2 33",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r2nk2r/1p2bppp/p3p3/8/P4nB1/1P1P2N1/2QN1PbP/R1B1K1R b Qkq - 7 21",
    "2r1k2r/pp1n2p1/5p1p/2P5/4PP2/8/PPb3PP/4KBNR b Kk - 0 19",
    "rkb4r/pp1pnppp/2npp3/8/P5P1/1P1N1N1P/3PPP2/2RQKB1R w K - 4 20",
    "7r/3b3p/Q2b1k2/2pq2p1/5p2/2P5/PP1NBPPP/3R1KR w - - 4 22",
    "r2qk1nr/1pp2pBp/8/3p4/pb1P2b1/2N5/PPP1PPPP/R2QKB1R b KQkq - 0 9",
    "2kr4/2pnr3/3p4/1p1P1B2/P3P2P/2K4P/2R5/R w - - 0 42",
    "rn2kb1r/1ppqpbpp/5n2/p3Q3/8/PP1P4/1BPP1PPP/R2NKB1R b KQkq - 3 13",
    "r2qkbnr/ppp1Bppp/2n5/3p1b2/3P4/2N5/PPP1PPPP/R2QKBNR b KQkq - 0 4",
    "r3k1nr/pp1n1pbp/1qp1p1p1/6B1/P2PP1P1/1Pp2N2/2P2P2/R2QKB1R b KQkq - 0 13",
];
