use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vanguard::board::Board;
use vanguard::movegen;
use vanguard::search::{find_best_move, SearchOptions};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn perft_start(c: &mut Criterion) {
    let board = Board::start_position();
    c.bench_function("perft start depth 3", |b| {
        b.iter(|| movegen::perft(black_box(&board), 3))
    });
}

fn perft_kiwipete(c: &mut Criterion) {
    let board = Board::from_fen(KIWIPETE).unwrap();
    c.bench_function("perft kiwipete depth 2", |b| {
        b.iter(|| movegen::perft(black_box(&board), 2))
    });
}

fn search_midgame(c: &mut Criterion) {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let options = SearchOptions {
        depth: 4,
        use_iterative_deepening: false,
        ..SearchOptions::default()
    };
    c.bench_function("search midgame depth 4", |b| {
        b.iter(|| {
            // fresh board per iteration so the transposition table starts cold
            let board = Board::from_fen(black_box(fen)).unwrap();
            find_best_move(&board, &options).unwrap()
        })
    });
}

criterion_group!(benches, perft_start, perft_kiwipete, search_midgame);
criterion_main!(benches);
