use std::time::Duration;

use criterion::{black_box, Bencher, Criterion};

use talon_core::helper::Helper;
use talon_core::{BitBoard, SQ};

fn rook_lookup(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let x: u64 = m.rook_moves(BitBoard(a as u64), SQ(c)).0;
            a ^ x
        })
    })
}

fn bishop_lookup(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let x: u64 = m.bishop_moves(BitBoard(a as u64), SQ(c)).0;
            a ^ x
        })
    })
}

fn queen_lookup(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let x: u64 = m.queen_moves(BitBoard(a as u64), SQ(c)).0;
            a ^ x
        })
    })
}

fn king_lookup(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let x: u64 = m.king_moves(SQ(c)).0;
            a ^ x
        })
    })
}

fn knight_lookup(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let x: u64 = m.knight_moves(SQ(c)).0;
            a ^ x
        })
    })
}

fn multi_lookup_sequential(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let mut x: u64 = m.knight_moves(SQ(c)).0;
            x ^= m.king_moves(SQ(c)).0;
            x ^= m.bishop_moves(BitBoard(x), SQ(c)).0;
            x ^= m.rook_moves(BitBoard(x), SQ(c)).0;
            x ^= m.queen_moves(BitBoard(x), SQ(c)).0;
            a ^ x
        })
    })
}

fn multi_lookup_stutter(b: &mut Bencher) {
    let m = Helper::new();
    b.iter(|| {
        (0..64u8).fold(0u64, |a, c| {
            let mut x: u64 = m.queen_moves(BitBoard(a), SQ(c)).0;
            x ^= m.king_moves(SQ(c)).0;
            x ^= m.bishop_moves(BitBoard(a), SQ(c)).0;
            x ^= m.knight_moves(SQ(c)).0;
            x ^= black_box(m.rook_moves(BitBoard(a), SQ(c)).0);
            a ^ x
        })
    })
}

fn magic_lookups(c: &mut Criterion) {
    c.bench_function("magic rook_lookup", rook_lookup);
    c.bench_function("magic bishop_lookup", bishop_lookup);
    c.bench_function("magic queen_lookup", queen_lookup);
    c.bench_function("magic king_lookup", king_lookup);
    c.bench_function("magic knight_lookup", knight_lookup);
    c.bench_function("magic multi_lookup_sequential", multi_lookup_sequential);
    c.bench_function("magic multi_lookup_stutter", multi_lookup_stutter);
}

criterion_group!(name = magic_benches;
    config = Criterion::default()
        .sample_size(250)
        .warm_up_time(Duration::from_millis(3));
    targets = magic_lookups
);
