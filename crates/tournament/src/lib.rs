//! Tournament odds estimator
//!
//! This crate provides infrastructure for:
//! - Turning Elo rating gaps into head-to-head win probabilities
//! - Simulating complete round-robin tournaments
//! - Estimating each competitor's chance of a top-K finish by Monte Carlo
//!
//! # Usage
//!
//! ```bash
//! # Top 3 odds for the built-in roster, 10 000 simulations
//! cargo run -p tournament_odds -- simulate
//!
//! # Custom roster, podium of 4, reproducible
//! cargo run -p tournament_odds -- simulate --roster teams.toml --top-k 4 --seed 7
//! ```

mod config;
mod elo;
mod error;
mod monte_carlo;
mod report;
mod roster;
mod simulator;

pub use config::*;
pub use elo::*;
pub use error::*;
pub use monte_carlo::*;
pub use report::*;
pub use roster::*;
pub use simulator::*;

use tracing::debug;

/// Run the aggregator as described by `config`
///
/// Always runs in parallel with a seed; when the config has none, one is
/// drawn at random and recorded in the report so the run can be repeated.
pub fn simulate(roster: &Roster, config: &SimulationConfig) -> Result<AggregateReport> {
    config.validate()?;
    let model = config.model()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    debug!(seed, explicit = config.seed.is_some(), "Resolved simulation seed");

    MonteCarloAggregator::new(roster, &model, config.trials, config.top_k)?
        .with_tie_break(config.tie_break)
        .run_parallel(seed, config.threads)
}
