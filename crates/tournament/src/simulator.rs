//! Round-robin simulator: one trial plays every pairing exactly once

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::elo::RatingModel;
use crate::roster::Roster;

/// Iterate every unordered pair `(i, j)` with `i < j` over `0..n`
pub fn pairings(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// How competitors level on wins are ordered in a trial's standings
///
/// Neither rule consumes random draws, so seeded trials stay reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Earlier roster position always ranks first
    RosterOrder,
    /// Priority starts at roster index `trial % n` and wraps around, so over
    /// many trials no position is favoured
    #[default]
    Rotating,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rotating" => Ok(TieBreak::Rotating),
            "roster-order" | "roster" => Ok(TieBreak::RosterOrder),
            other => Err(format!(
                "unknown tie-break '{}' (expected 'rotating' or 'roster-order')",
                other
            )),
        }
    }
}

/// Win counts of a single trial, indexed by roster position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    wins: Vec<u32>,
}

impl TrialOutcome {
    pub fn new(num_competitors: usize) -> Self {
        Self {
            wins: vec![0; num_competitors],
        }
    }

    pub fn wins(&self) -> &[u32] {
        &self.wins
    }

    pub fn wins_of(&self, idx: usize) -> u32 {
        self.wins[idx]
    }

    pub fn record_win(&mut self, idx: usize) {
        self.wins[idx] += 1;
    }

    /// Total wins handed out; equals the pairing count for a finished trial
    pub fn total_wins(&self) -> u64 {
        self.wins.iter().map(|&w| u64::from(w)).sum()
    }

    /// Rank by win count, descending. Ties keep roster order.
    pub fn standings(&self) -> Standings {
        self.standings_from(0)
    }

    /// Rank by win count, descending. Ties are ordered by roster index
    /// starting at `first` and wrapping around.
    pub fn standings_from(&self, first: usize) -> Standings {
        let n = self.wins.len();
        let first = if n == 0 { 0 } else { first % n };
        // Stable sort over the rotated order keeps tied entries in that order
        let mut order: Vec<usize> = (first..n).chain(0..first).collect();
        order.sort_by(|&a, &b| self.wins[b].cmp(&self.wins[a]));
        Standings { order }
    }

    /// Standings for the `trial`-th trial of a run under `tie_break`
    pub fn standings_for(&self, tie_break: TieBreak, trial: u64) -> Standings {
        match tie_break {
            TieBreak::RosterOrder => self.standings(),
            TieBreak::Rotating => {
                let n = self.wins.len().max(1) as u64;
                self.standings_from((trial % n) as usize)
            }
        }
    }
}

/// Roster indices from first to last place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    order: Vec<usize>,
}

impl Standings {
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// First `k` finishers, or everyone if there are fewer than `k`
    pub fn top_k(&self, k: usize) -> &[usize] {
        &self.order[..k.min(self.order.len())]
    }
}

/// Runs round-robin trials over a fixed roster
///
/// Pairwise win probabilities are computed once up front, so a trial costs
/// one uniform draw and one comparison per pairing.
#[derive(Debug, Clone)]
pub struct TournamentSimulator {
    num_competitors: usize,
    /// P(i beats j) for every `(i, j)` from [`pairings`], in the same order
    pair_probabilities: Vec<f64>,
}

impl TournamentSimulator {
    pub fn new<M: RatingModel + ?Sized>(roster: &Roster, model: &M) -> Self {
        let ratings: Vec<f64> = roster.ratings().collect();
        let pair_probabilities = pairings(ratings.len())
            .map(|(i, j)| model.win_probability(ratings[i], ratings[j]))
            .collect();

        Self {
            num_competitors: ratings.len(),
            pair_probabilities,
        }
    }

    pub fn num_competitors(&self) -> usize {
        self.num_competitors
    }

    pub fn num_pairings(&self) -> usize {
        self.pair_probabilities.len()
    }

    /// Play one full round-robin
    ///
    /// For pairing `(i, j)` the first competitor wins when the draw from
    /// `[0, 1)` is below `P(i beats j)`; otherwise the second one does.
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> TrialOutcome {
        let mut outcome = TrialOutcome::new(self.num_competitors);

        for ((i, j), &p) in pairings(self.num_competitors).zip(&self.pair_probabilities) {
            let draw: f64 = rng.gen();
            if draw < p {
                outcome.record_win(i);
            } else {
                outcome.record_win(j);
            }
        }

        outcome
    }
}

/// Ranking helper for callers holding a bare outcome
pub fn rank(outcome: &TrialOutcome) -> Standings {
    outcome.standings()
}

/// Order two `(index, value)` entries by value descending, then by index
pub(crate) fn descending_then_index(a: (usize, f64), b: (usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;
