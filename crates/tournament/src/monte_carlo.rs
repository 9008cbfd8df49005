//! Monte Carlo aggregation of top-K finishes over many simulated trials

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::ops::Range;
use tracing::{debug, info};

use crate::elo::RatingModel;
use crate::error::{Error, Result};
use crate::report::AggregateReport;
use crate::roster::Roster;
use crate::simulator::{TieBreak, TournamentSimulator};

/// Trials handled by one parallel work unit (one RNG stream each)
pub const TRIALS_PER_CHUNK: u64 = 1024;

/// Per-competitor top-K appearance counts, partial or complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceCounts {
    counts: Vec<u64>,
    trials: u64,
}

impl AppearanceCounts {
    pub fn new(num_competitors: usize) -> Self {
        Self {
            counts: vec![0; num_competitors],
            trials: 0,
        }
    }

    /// Record the top-K finishers of one trial
    pub fn record(&mut self, top_k: &[usize]) {
        for &idx in top_k {
            self.counts[idx] += 1;
        }
        self.trials += 1;
    }

    /// Sum two partial tallies
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
        self.trials += other.trials;
        self
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }
}

/// Repeats round-robin trials and tallies who finishes in the top K
///
/// Construction validates the run parameters; `top_k` larger than the
/// roster is clamped to the roster size. Ties in each trial are broken by
/// [`TieBreak::Rotating`] unless changed with [`Self::with_tie_break`].
#[derive(Debug, Clone)]
pub struct MonteCarloAggregator<'a> {
    roster: &'a Roster,
    simulator: TournamentSimulator,
    trials: u64,
    top_k: usize,
    tie_break: TieBreak,
}

impl<'a> MonteCarloAggregator<'a> {
    pub fn new<M: RatingModel + ?Sized>(
        roster: &'a Roster,
        model: &M,
        trials: u64,
        top_k: usize,
    ) -> Result<Self> {
        if trials == 0 {
            return Err(Error::ZeroTrials);
        }
        if top_k == 0 {
            return Err(Error::ZeroTopK);
        }

        Ok(Self {
            roster,
            simulator: TournamentSimulator::new(roster, model),
            trials,
            top_k: top_k.min(roster.len()),
            tie_break: TieBreak::default(),
        })
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Top-K after clamping to the roster size
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Run every trial sequentially on the caller's random source
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AggregateReport> {
        info!(
            competitors = self.roster.len(),
            trials = self.trials,
            top_k = self.top_k,
            "Running sequential simulation"
        );

        let counts = self.run_trials(0..self.trials, rng);
        AggregateReport::from_counts(self.roster, &counts, self.top_k, None)
    }

    /// Run trials across worker threads
    ///
    /// Trials are split into chunks of [`TRIALS_PER_CHUNK`], each with its own
    /// stream derived from `(seed, chunk)`, and the partial tallies are summed.
    /// The result depends only on `seed` and the trial count, not on
    /// `threads` or scheduling. `threads = None` uses the global rayon pool.
    pub fn run_parallel(&self, seed: u64, threads: Option<usize>) -> Result<AggregateReport> {
        let chunks = self.trials.div_ceil(TRIALS_PER_CHUNK);
        info!(
            competitors = self.roster.len(),
            trials = self.trials,
            top_k = self.top_k,
            chunks,
            seed,
            "Running parallel simulation"
        );

        let tally = || {
            (0..chunks)
                .into_par_iter()
                .map(|chunk| {
                    let start = chunk * TRIALS_PER_CHUNK;
                    let end = self.trials.min(start + TRIALS_PER_CHUNK);
                    let mut rng = chunk_rng(seed, chunk);
                    self.run_trials(start..end, &mut rng)
                })
                .reduce(
                    || AppearanceCounts::new(self.roster.len()),
                    AppearanceCounts::merge,
                )
        };

        let counts = match threads {
            Some(num_threads) => {
                let pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
                debug!(threads = pool.current_num_threads(), "Built local worker pool");
                pool.install(tally)
            }
            None => tally(),
        };

        debug_assert_eq!(counts.trials(), self.trials);
        AggregateReport::from_counts(self.roster, &counts, self.top_k, Some(seed))
    }

    /// Play the trials numbered `trials`; the number feeds the tie-break
    fn run_trials<R: Rng + ?Sized>(&self, trials: Range<u64>, rng: &mut R) -> AppearanceCounts {
        let mut counts = AppearanceCounts::new(self.roster.len());
        for trial in trials {
            let standings = self
                .simulator
                .run_trial(rng)
                .standings_for(self.tie_break, trial);
            counts.record(standings.top_k(self.top_k));
        }
        counts
    }
}

/// Independent stream for one chunk: ChaCha keyed by `(seed, chunk)`
fn chunk_rng(seed: u64, chunk: u64) -> StdRng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&chunk.to_le_bytes());
    StdRng::from_seed(key)
}

/// Sequential run on a caller-supplied random source
pub fn run<M, R>(
    roster: &Roster,
    model: &M,
    trials: u64,
    top_k: usize,
    rng: &mut R,
) -> Result<AggregateReport>
where
    M: RatingModel + ?Sized,
    R: Rng + ?Sized,
{
    MonteCarloAggregator::new(roster, model, trials, top_k)?.run(rng)
}

/// Seeded parallel run
pub fn run_parallel<M: RatingModel + ?Sized>(
    roster: &Roster,
    model: &M,
    trials: u64,
    top_k: usize,
    seed: u64,
    threads: Option<usize>,
) -> Result<AggregateReport> {
    MonteCarloAggregator::new(roster, model, trials, top_k)?.run_parallel(seed, threads)
}

#[cfg(test)]
#[path = "monte_carlo_tests.rs"]
mod monte_carlo_tests;
