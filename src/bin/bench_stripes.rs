use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;
use stripe_life::sequential::sequential_game_of_life;
use stripe_life::striped::{StripedLife, StripedLifeConfig};

const DENSITY: f64 = 0.42;
const SEED: u64 = 0x5EED_CAFE_F00D;

fn random_board(side: usize) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(SEED);
    (0..side * side)
        .map(|_| (rng.random::<f64>() < DENSITY) as u8)
        .collect()
}

fn bench_sequential(side: usize, generations: u64) -> f64 {
    let mut inboard = random_board(side);
    let mut outboard = vec![0u8; side * side];

    let start = Instant::now();
    let result = sequential_game_of_life(&mut outboard, &mut inboard, side, side, generations);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    std::hint::black_box(result.iter().map(|&c| c as u64).sum::<u64>());
    total_ms
}

fn bench_striped(engine: &StripedLife, side: usize, generations: u64) -> f64 {
    let mut inboard = random_board(side);
    let mut outboard = vec![0u8; side * side];

    let start = Instant::now();
    let result = engine
        .compute_generations(&mut outboard, &mut inboard, side, side, generations)
        .expect("bench boards are valid");
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    std::hint::black_box(result.iter().map(|&c| c as u64).sum::<u64>());
    total_ms
}

fn main() {
    let workers: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("worker count must be a positive integer"))
        .unwrap_or(4);
    let engine = StripedLife::with_config(StripedLifeConfig::default().worker_count(workers))
        .expect("build striped engine");

    let scales: &[(usize, u64)] = &[(64, 4000), (256, 1000), (1024, 100), (4096, 10)];

    println!(
        "{:<12} {:>8} {:>14} {:>14} {:>9}",
        "Grid", "Iters", "Seq(ms)", "Striped(ms)", "Speedup"
    );
    println!("{}", "-".repeat(62));

    for &(side, generations) in scales {
        let seq_ms = bench_sequential(side, generations);
        let striped_ms = bench_striped(&engine, side, generations);
        println!(
            "{:<12} {:>8} {:>14.1} {:>14.1} {:>8.2}x",
            format!("{side}x{side}"),
            generations,
            seq_ms,
            striped_ms,
            seq_ms / striped_ms
        );
    }
}
