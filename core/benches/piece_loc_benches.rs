use criterion::{black_box, Bencher, Criterion};

use talon_core::board::piece_locations::PieceLocations;
use talon_core::core::{ALL_PIECE_TYPES, ALL_PLAYERS};
use talon_core::{Board, PieceType, Player, SQ};

fn bench_piece_contains_default_16(b: &mut Bencher) {
    let s: PieceLocations = Board::default().get_piece_locations();
    b.iter(|| {
        for piece in black_box(ALL_PIECE_TYPES.iter()) {
            for player in black_box(ALL_PLAYERS.iter()) {
                black_box(&s).contains(black_box(*piece), black_box(*player));
            }
        }
    })
}

fn bench_piece_contains_sparse_16_even(b: &mut Bencher) {
    let mut s: PieceLocations = PieceLocations::blank();
    for x in 0..6u8 {
        for y in 0..2u8 {
            let sq = SQ(((x * 32) + (y * 5)) % 64);
            s.place(sq, ALL_PLAYERS[y as usize], ALL_PIECE_TYPES[x as usize]);
        }
    }
    b.iter(|| {
        for piece in black_box(ALL_PIECE_TYPES.iter()) {
            for player in black_box(ALL_PLAYERS.iter()) {
                black_box(&s).contains(black_box(*piece), black_box(*player));
            }
        }
    })
}

fn bench_piece_contains_singular(b: &mut Bencher) {
    let mut s: PieceLocations = PieceLocations::blank();
    let piece = PieceType::P;
    let player = Player::White;
    s.place(SQ::H8, player, piece);
    b.iter(|| black_box(&s).contains(black_box(piece), black_box(player)))
}

fn bench_piece_eq(b: &mut Bencher) {
    let s: PieceLocations = Board::default().get_piece_locations();
    let s2: PieceLocations = Board::default().get_piece_locations();
    b.iter(|| black_box(&s).eq(black_box(&s2)))
}

fn piece_locations_bench(c: &mut Criterion) {
    c.bench_function("piece_locations contains, default board", bench_piece_contains_default_16);
    c.bench_function("piece_locations contains, sparse board", bench_piece_contains_sparse_16_even);
    c.bench_function("piece_locations contains, single piece", bench_piece_contains_singular);
    c.bench_function("piece_locations eq", bench_piece_eq);
}

criterion_group!(name = piece_loc_benches;
    config = Criterion::default();
    targets = piece_locations_bench
);
