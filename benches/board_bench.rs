use criterion::{black_box, criterion_group, criterion_main, Criterion};

use derby_memory::board::build_board;
use derby_memory::cards::DerbyCatalog;
use derby_memory::core::GameRng;
use derby_memory::games::derby::DerbyMemory;
use derby_memory::selfplay::{play_game, SelfPlayConfig, Strategy};

fn bench_build_board(c: &mut Criterion) {
    let catalog = DerbyCatalog::reference();
    let mut rng = GameRng::new(42);
    c.bench_function("build_board_8_derbies", |b| {
        b.iter(|| build_board(black_box(&catalog), &mut rng))
    });
}

fn bench_reset(c: &mut Criterion) {
    let mut game = DerbyMemory::with_seed(42).unwrap();
    c.bench_function("reset_game", |b| b.iter(|| game.reset_game()));
}

fn bench_snapshot(c: &mut Criterion) {
    let game = DerbyMemory::with_seed(42).unwrap();
    c.bench_function("board_snapshot", |b| b.iter(|| black_box(&game).snapshot()));
}

fn bench_full_game(c: &mut Criterion) {
    let recall = SelfPlayConfig::default();
    c.bench_function("recall_game_2_players", |b| {
        b.iter(|| play_game(black_box(&recall), 7).unwrap())
    });

    let random = SelfPlayConfig {
        strategy: Strategy::Random,
        ..SelfPlayConfig::default()
    };
    c.bench_function("random_game_2_players", |b| {
        b.iter(|| play_game(black_box(&random), 7).unwrap())
    });
}

criterion_group!(benches, bench_build_board, bench_reset, bench_snapshot, bench_full_game);
criterion_main!(benches);
