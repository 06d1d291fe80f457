//! Benchmarks for move generation and perft throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_engine::{parse_fen, Position};

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::starting_position();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut kiwipete =
        parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::starting_position();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.generate_legal_moves()))
    });

    let middlegame =
        parse_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.generate_legal_moves()))
    });

    let kiwipete =
        parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.generate_legal_moves()))
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen);
criterion_main!(benches);
