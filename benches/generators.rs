use criterion::{criterion_group, criterion_main, Criterion};
use path_mazes::{
    difficulty::Difficulty,
    generators::{self, BoardSpec, GeneratorConfig},
    units::{BoardSize, ObstacleCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_tier(c: &mut Criterion, name: &str, difficulty: Difficulty) {
    let spec = difficulty.board_spec();
    let config = GeneratorConfig::default();
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function(name, move |b| {
        b.iter(|| generators::generate_with_rng(&spec, &config, &mut rng))
    });
}

fn bench_easy_board(c: &mut Criterion) {
    bench_tier(c, "easy_board_5", Difficulty::Easy);
}

fn bench_normal_board(c: &mut Criterion) {
    bench_tier(c, "normal_board_7", Difficulty::Normal);
}

fn bench_hard_board(c: &mut Criterion) {
    bench_tier(c, "hard_board_9", Difficulty::Hard);
}

fn bench_large_open_board(c: &mut Criterion) {
    let spec = BoardSpec::new(BoardSize(32), ObstacleCount(0)).unwrap();
    let config = GeneratorConfig::default().with_max_attempts(1_000);
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function("open_board_32", move |b| {
        b.iter(|| generators::generate_with_rng(&spec, &config, &mut rng))
    });
}

fn bench_serpentine_fallback(c: &mut Criterion) {
    let spec = BoardSpec::new(BoardSize(32), ObstacleCount(0)).unwrap();
    let config = GeneratorConfig::default().with_max_attempts(0);
    c.bench_function("serpentine_fallback_32", move |b| {
        b.iter(|| generators::generate_seeded(&spec, &config, 1))
    });
}

criterion_group!(
    benches,
    bench_easy_board,
    bench_normal_board,
    bench_hard_board,
    bench_large_open_board,
    bench_serpentine_fallback
);
criterion_main!(benches);
