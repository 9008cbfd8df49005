//! Tournament odds CLI
//!
//! Simulate round-robin tournaments and report top-K finish probabilities.

mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tournament_odds::{
    simulate, win_probability, EloModel, RatingModel, Roster, SimulationConfig, TieBreak,
};
use tracing::info;

use crate::logging::setup_logging;

/// Estimate who finishes on top of an Elo-rated round-robin.
#[derive(Parser, Debug)]
#[command(name = "tournament_odds", version, about, long_about = None)]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Monte Carlo simulation and print the top-K odds
    Simulate(SimulateArgs),
    /// Print the roster sorted by rating
    Roster {
        /// Roster file (.toml or .json); built-in roster when omitted
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Head-to-head win probability for two ratings
    #[command(allow_negative_numbers = true)]
    Odds {
        rating_a: f64,
        rating_b: f64,
        /// Rating gap for 10:1 odds
        #[arg(long)]
        scale: Option<f64>,
    },
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Roster file (.toml or .json); built-in roster when omitted
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Simulation settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated tournaments
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Finish positions that count (e.g. 3 for a podium)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// How to order competitors level on wins: rotating or roster-order
    #[arg(long)]
    tie_break: Option<TieBreak>,

    /// Report lines to print
    #[arg(long)]
    display: Option<usize>,

    /// Print every competitor instead of the first `display`
    #[arg(long)]
    all: bool,

    /// Write the full report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SimulateArgs {
    /// File settings first, then command line overrides
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        if let Some(display) = self.display {
            config.display = display;
        }

        config.validate()?;
        Ok(config)
    }
}

fn load_roster(path: Option<&Path>) -> Result<Roster> {
    match path {
        Some(path) => Roster::load(path)
            .with_context(|| format!("Failed to load roster {}", path.display())),
        None => Ok(Roster::default_roster()),
    }
}

fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let roster = load_roster(args.roster.as_deref())?;

    info!(
        competitors = roster.len(),
        trials = config.trials,
        top_k = config.top_k,
        "Starting simulation"
    );
    let started = Instant::now();
    let report = simulate(&roster, &config)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Simulation finished");

    let limit = if args.all { None } else { Some(config.display) };
    report.print_report(limit);

    if let Some(path) = &args.output {
        report
            .save(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Report saved");
    }

    Ok(())
}

fn show_roster(path: Option<&Path>) -> Result<()> {
    let roster = load_roster(path)?;

    println!("\n=== Roster ({} competitors) ===", roster.len());
    println!("{:<30} {:>8}", "Competitor", "Elo");
    println!("{}", "-".repeat(39));
    for competitor in roster.by_rating() {
        println!("{:<30} {:>8.1}", competitor.name, competitor.rating);
    }
    println!();
    Ok(())
}

fn show_odds(rating_a: f64, rating_b: f64, scale: Option<f64>) -> Result<()> {
    anyhow::ensure!(
        rating_a.is_finite() && rating_b.is_finite(),
        "ratings must be finite numbers"
    );

    let p = match scale {
        Some(scale) => EloModel::with_scale(scale)?.win_probability(rating_a, rating_b),
        None => win_probability(rating_a, rating_b),
    };
    println!("P({rating_a} beats {rating_b}) = {:.4} ({:.1}%)", p, p * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Command::Simulate(args) => run_simulate(args),
        Command::Roster { roster } => show_roster(roster.as_deref()),
        Command::Odds {
            rating_a,
            rating_b,
            scale,
        } => show_odds(*rating_a, *rating_b, *scale),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
