//! Competitor roster: the fixed, ordered input of a simulation run
//!
//! Roster order is the canonical ordering used everywhere downstream. It
//! decides which side is "A" in a pairing, orders equal frequencies in the
//! report, and is the tie-break of `TieBreak::RosterOrder`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// A single rated competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub rating: f64,
}

impl Competitor {
    pub fn new(name: impl Into<String>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// Validated competitor set (at least two, unique names, finite ratings)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

/// On-disk layout of a TOML roster file
#[derive(Debug, Deserialize)]
struct RosterFile {
    competitors: Vec<Competitor>,
}

/// Approximate ratings of the 2025 Worlds field, used when no roster is given
const DEFAULT_ROSTER: &[(&str, f64)] = &[
    ("Gen.G", 1627.0),
    ("Hanwha Life Esports", 1569.0),
    ("T1", 1538.0),
    ("KT Rolster", 1480.0),
    ("Anyone's Legend", 1508.0),
    ("Bilibili Gaming", 1402.0),
    ("Top Esports", 1396.0),
    ("Invictus Gaming", 1350.0),
    ("G2 Esports", 1450.0),
    ("Movistar KOI", 1420.0),
    ("Fnatic", 1350.0),
    ("FlyQuest", 1420.0),
    ("Vivo Keyd Stars", 1250.0),
    ("100 Thieves", 1300.0),
    ("CTBC Flying Oyster", 1350.0),
    ("Team Secret Whales", 1250.0),
    ("PSG Talon", 1300.0),
];

impl Roster {
    pub fn new(competitors: Vec<Competitor>) -> Result<Self> {
        if competitors.len() < 2 {
            return Err(Error::TooFewCompetitors {
                found: competitors.len(),
            });
        }

        let mut seen = HashSet::with_capacity(competitors.len());
        for (idx, competitor) in competitors.iter().enumerate() {
            if competitor.name.trim().is_empty() {
                return Err(Error::EmptyName(idx));
            }
            if !competitor.rating.is_finite() {
                return Err(Error::NonFiniteRating {
                    name: competitor.name.clone(),
                    rating: competitor.rating,
                });
            }
            if !seen.insert(competitor.name.as_str()) {
                return Err(Error::DuplicateCompetitor(competitor.name.clone()));
            }
        }

        Ok(Self { competitors })
    }

    /// Build from `(name, rating)` pairs, keeping iteration order
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, rating)| Competitor::new(name, rating))
                .collect(),
        )
    }

    /// The built-in roster
    pub fn default_roster() -> Self {
        Self {
            competitors: DEFAULT_ROSTER
                .iter()
                .map(|&(name, rating)| Competitor::new(name, rating))
                .collect(),
        }
    }

    /// Parse a TOML roster (`[[competitors]]` tables with `name` and `rating`)
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: RosterFile = toml::from_str(contents)?;
        Self::new(file.competitors)
    }

    /// Parse a JSON roster (array of `{ "name": .., "rating": .. }`)
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let competitors: Vec<Competitor> = serde_json::from_str(contents)?;
        Self::new(competitors)
    }

    /// Load a roster file, choosing the format from its extension (TOML unless `.json`)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    /// Always false for a validated roster
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn get(&self, idx: usize) -> Option<&Competitor> {
        self.competitors.get(idx)
    }

    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.competitors.iter().map(|c| c.rating)
    }

    /// Number of pairings in one full round-robin: n(n-1)/2
    pub fn pairing_count(&self) -> usize {
        let n = self.competitors.len();
        n * (n - 1) / 2
    }

    /// Competitors sorted by rating (descending), ties in roster order
    pub fn by_rating(&self) -> Vec<&Competitor> {
        let mut sorted: Vec<_> = self.competitors.iter().collect();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        sorted
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod roster_tests;
