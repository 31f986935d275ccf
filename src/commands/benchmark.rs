//! Benchmark command
//!
//! Auto-plays random past days and measures how long the candidate searches take.

use super::solve::{SolveConfig, solve_puzzle};
use crate::daily::{GameDate, Puzzle};
use crate::solver::{Engine, EngineStats};
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Days back from the latest date that random puzzles are drawn from
pub const BENCHMARK_SPAN_DAYS: u64 = 3650;

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_days: usize,
    pub solved: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: HashMap<usize, usize>,
    pub duration: Duration,
    pub days_per_second: f64,
    pub cache: EngineStats,
}

/// Auto-play `count` random days ending at `latest`
pub fn run_benchmark<R: Rng>(
    engine: &Engine,
    num_digits: usize,
    count: usize,
    latest: GameDate,
    rng: &mut R,
) -> BenchmarkResult {
    let start = Instant::now();
    let mut total_guesses = 0;
    let mut solved = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: HashMap<usize, usize> = HashMap::new();
    let mut total_days = 0;

    for _ in 0..count {
        let Some(date) = latest.days_before(rng.random_range(0..BENCHMARK_SPAN_DAYS)) else {
            continue;
        };
        let puzzle = Puzzle::new(date, num_digits);
        let Ok(result) = solve_puzzle(SolveConfig::new(puzzle), engine) else {
            continue;
        };

        let guesses = result.guesses.len();
        debug!(%date, guesses, success = result.success, "benchmark day played");

        total_days += 1;
        total_guesses += guesses;
        min_guesses = min_guesses.min(guesses);
        max_guesses = max_guesses.max(guesses);
        if result.success {
            solved += 1;
            *distribution.entry(guesses).or_insert(0) += 1;
        }
    }

    let duration = start.elapsed();

    BenchmarkResult {
        total_days,
        solved,
        total_guesses,
        average_guesses: if total_days == 0 {
            0.0
        } else {
            total_guesses as f64 / total_days as f64
        },
        min_guesses: if total_days == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        duration,
        days_per_second: total_days as f64 / duration.as_secs_f64().max(f64::EPSILON),
        cache: engine.stats(),
    }
}
