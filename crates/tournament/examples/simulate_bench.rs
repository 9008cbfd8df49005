//! Simulation throughput benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example simulate_bench -p tournament_odds -- [trials] [threads]
//!
//! Examples:
//!   # Default: 200 000 trials on the built-in roster, sequential and parallel
//!   cargo flamegraph --example simulate_bench -p tournament_odds
//!
//!   # One million trials, parallel run pinned to 4 threads
//!   cargo flamegraph --example simulate_bench -p tournament_odds -- 1000000 4

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::time::{Duration, Instant};
use tournament_odds::{EloModel, MonteCarloAggregator, Roster};

const SEED: u64 = 0x5EED;

fn main() {
    let args: Vec<String> = env::args().collect();

    let trials: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(200_000);
    let threads: Option<usize> = args.get(2).and_then(|s| s.parse().ok());

    let roster = Roster::default_roster();
    let aggregator = match MonteCarloAggregator::new(&roster, &EloModel::new(), trials, 3) {
        Ok(aggregator) => aggregator,
        Err(e) => {
            eprintln!("Invalid benchmark setup: {e}");
            std::process::exit(1);
        }
    };

    println!("=== Simulation Benchmark ===");
    println!(
        "Competitors: {}, pairings/trial: {}, trials: {trials}",
        roster.len(),
        roster.pairing_count()
    );
    println!();

    let start = Instant::now();
    let sequential = match aggregator.run(&mut StdRng::seed_from_u64(SEED)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Sequential run failed: {e}");
            std::process::exit(1);
        }
    };
    report_line("Sequential", trials, start.elapsed());

    let start = Instant::now();
    let parallel = match aggregator.run_parallel(SEED, threads) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Parallel run failed: {e}");
            std::process::exit(1);
        }
    };
    report_line("Parallel", trials, start.elapsed());

    println!();
    println!("{:=<70}", "");
    for (seq, par) in sequential.top(3).iter().zip(parallel.top(3)) {
        println!(
            "{:<24} seq {:>6.2}%   par {:>6.2}%",
            seq.name,
            seq.frequency * 100.0,
            par.frequency * 100.0
        );
    }
}

fn report_line(label: &str, trials: u64, elapsed: Duration) {
    let tps = if elapsed.as_secs_f64() > 0.0 {
        trials as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    println!("{label:.<30} {trials:>10} trials in {elapsed:>8.3?} ({tps:>10.0} trials/s)");
}
