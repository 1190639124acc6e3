use std::time::Duration;

use criterion::{black_box, Bencher, Criterion};

use talon_core::core::bit_twiddles::{popcount_rust, popcount_table};
use talon_core::core::bitboard::{BitBoard, RandBitBoard};

lazy_static! {
    pub static ref BIT_SETS_DENSE_1000: Vec<BitBoard> =
        RandBitBoard::default().pseudo_random(2661634).avg(6).max(11).many(1000);
}

fn bench_popcount_1000_builtin(b: &mut Bencher) {
    b.iter(|| {
        for bits in BIT_SETS_DENSE_1000.iter() {
            black_box((*bits).0.count_ones());
        }
    })
}

fn bench_popcount_1000_table(b: &mut Bencher) {
    b.iter(|| {
        for bits in BIT_SETS_DENSE_1000.iter() {
            black_box(popcount_table(black_box((*bits).0)));
        }
    })
}

fn bench_popcount_1000_rust(b: &mut Bencher) {
    b.iter(|| {
        for bits in BIT_SETS_DENSE_1000.iter() {
            black_box(popcount_rust(black_box((*bits).0)));
        }
    })
}

fn popcount_bench(c: &mut Criterion) {
    c.bench_function("popcount builtin 1000", bench_popcount_1000_builtin);
    c.bench_function("popcount table 1000", bench_popcount_1000_table);
    c.bench_function("popcount loop 1000", bench_popcount_1000_rust);
}

criterion_group!(name = bit_benches;
    config = Criterion::default()
        .sample_size(250)
        .warm_up_time(Duration::from_millis(3));
    targets = popcount_bench
);
