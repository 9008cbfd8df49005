//! Elo win probability model

use crate::error::{Error, Result};

/// Rating difference that corresponds to 10:1 odds
pub const ELO_SCALE: f64 = 400.0;

/// Maps a pair of ratings to the probability that the first side wins.
///
/// Implementations must be complementary: `p(a, b) + p(b, a) == 1`, since a
/// pairing always has exactly one winner and the loser is whoever did not win.
pub trait RatingModel: Send + Sync {
    /// Probability that the side rated `rating_a` beats the side rated `rating_b`
    fn win_probability(&self, rating_a: f64, rating_b: f64) -> f64;
}

/// Logistic Elo model: `1 / (1 + 10^((b - a) / scale))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloModel {
    scale: f64,
}

impl EloModel {
    pub fn new() -> Self {
        Self { scale: ELO_SCALE }
    }

    /// Model with a custom scale (rating gap for 10:1 odds)
    pub fn with_scale(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for EloModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingModel for EloModel {
    /// Strictly inside `(0, 1)` for any realistic gap. In `f64` the favourite's
    /// probability rounds to exactly `1.0` once it leads by about 16 scale
    /// units (roughly 6400 points at the default scale), and the underdog's
    /// only reaches `0.0` when `10^x` overflows, past about 308 scale units.
    /// A pairing that lopsided is decided without any randomness.
    #[inline]
    fn win_probability(&self, rating_a: f64, rating_b: f64) -> f64 {
        1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / self.scale))
    }
}

/// Win probability under the standard 400-point Elo model
pub fn win_probability(rating_a: f64, rating_b: f64) -> f64 {
    EloModel::new().win_probability(rating_a, rating_b)
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
