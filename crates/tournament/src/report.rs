//! Aggregate report storage and text rendering

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::monte_carlo::AppearanceCounts;
use crate::roster::Roster;
use crate::simulator::descending_then_index;

/// One competitor's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub rating: f64,
    /// Trials in which the competitor finished in the top K
    pub appearances: u64,
    /// `appearances / trials`
    pub frequency: f64,
    /// Binomial standard error of `frequency`
    pub standard_error: f64,
}

/// Final result of a Monte Carlo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub trials: u64,
    /// Effective top-K (after clamping to the roster size)
    pub top_k: usize,
    /// Seed of a parallel run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Sorted by frequency descending, ties in roster order
    pub entries: Vec<ReportEntry>,
}

impl AggregateReport {
    /// Turn raw tallies into frequencies; a tally with no trials is rejected
    pub fn from_counts(
        roster: &Roster,
        counts: &AppearanceCounts,
        top_k: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let trials = counts.trials();
        if trials == 0 {
            return Err(Error::ZeroTrials);
        }
        let total = trials as f64;

        let mut ranked: Vec<(usize, f64)> = counts
            .counts()
            .iter()
            .enumerate()
            .map(|(idx, &count)| (idx, count as f64 / total))
            .collect();
        ranked.sort_by(|&a, &b| descending_then_index(a, b));

        let entries = ranked
            .into_iter()
            .map(|(idx, frequency)| {
                let competitor = &roster.competitors()[idx];
                ReportEntry {
                    name: competitor.name.clone(),
                    rating: competitor.rating,
                    appearances: counts.counts()[idx],
                    frequency,
                    standard_error: (frequency * (1.0 - frequency) / total).sqrt(),
                }
            })
            .collect();

        Ok(Self {
            trials,
            top_k,
            seed,
            entries,
        })
    }

    pub fn entry(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn frequency_of(&self, name: &str) -> Option<f64> {
        self.entry(name).map(|e| e.frequency)
    }

    /// The `n` most likely top-K finishers
    pub fn top(&self, n: usize) -> &[ReportEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report of the first `limit` entries (all if `None`)
    pub fn generate_report(&self, limit: Option<usize>) -> String {
        let shown = self.top(limit.unwrap_or(self.entries.len()));

        let mut report = String::new();
        report.push_str(&format!(
            "=== Top {} prediction ({} simulations) ===\n",
            self.top_k, self.trials
        ));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push('\n');

        report.push_str(&format!(
            "{:>3}  {:<24} {:>6} {:>10} {:>8} {:>7}\n",
            "#", "Competitor", "Elo", "Times", "Prob", "+/-"
        ));
        report.push_str(&"-".repeat(63));
        report.push('\n');

        for (rank, entry) in shown.iter().enumerate() {
            report.push_str(&format!(
                "{:>3}. {:<24} {:>6.0} {:>10} {:>7.1}% {:>6.2}%\n",
                rank + 1,
                entry.name,
                entry.rating,
                entry.appearances,
                entry.frequency * 100.0,
                entry.standard_error * 100.0
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self, limit: Option<usize>) {
        println!("{}", self.generate_report(limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AggregateReport {
        let roster = Roster::from_pairs([("A", 1500.0), ("B", 1600.0), ("C", 1400.0)]).unwrap();
        let mut counts = AppearanceCounts::new(3);
        counts.record(&[1, 0]);
        counts.record(&[1, 2]);
        counts.record(&[0, 2]);
        counts.record(&[1, 0]);
        AggregateReport::from_counts(&roster, &counts, 2, Some(42)).unwrap()
    }

    #[test]
    fn test_entries_sorted_by_frequency() {
        let report = sample_report();
        let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
        // A and B both appear 3 times; A comes first in the roster
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(report.frequency_of("B"), Some(0.75));
        assert_eq!(report.frequency_of("C"), Some(0.5));
        assert_eq!(report.entry("C").unwrap().appearances, 2);
        assert!(report.frequency_of("D").is_none());
    }

    #[test]
    fn test_empty_counts_rejected() {
        let roster = Roster::from_pairs([("A", 1500.0), ("B", 1600.0)]).unwrap();
        let counts = AppearanceCounts::new(2);
        let err = AggregateReport::from_counts(&roster, &counts, 1, None).unwrap_err();
        assert!(matches!(err, Error::ZeroTrials));
    }

    #[test]
    fn test_frequencies_are_finite_probabilities() {
        let report = sample_report();
        for entry in &report.entries {
            assert!((0.0..=1.0).contains(&entry.frequency));
            assert!(entry.standard_error.is_finite());
        }
    }

    #[test]
    fn test_standard_error() {
        let report = sample_report();
        let c = report.entry("C").unwrap();
        assert!((c.standard_error - (0.25f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_text_report_respects_limit() {
        let report = sample_report();
        let text = report.generate_report(Some(1));
        assert!(text.contains("Top 2 prediction (4 simulations)"));
        assert!(text.contains("Seed: 42"));
        assert!(text.contains("1. A"));
        assert!(!text.contains("2. B"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn test_save_and_load() {
        let report = sample_report();
        let path = std::env::temp_dir().join(format!("tournament_odds_report_{}.json", std::process::id()));

        report.save(&path).unwrap();
        let loaded = AggregateReport::load(&path).unwrap();
        assert_eq!(loaded.trials, 4);
        assert_eq!(loaded.top_k, 2);
        assert_eq!(loaded.seed, Some(42));
        for (a, b) in loaded.entries.iter().zip(&report.entries) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.appearances, b.appearances);
            assert!((a.frequency - b.frequency).abs() < 1e-12);
            assert!((a.standard_error - b.standard_error).abs() < 1e-12);
        }

        std::fs::remove_file(&path).ok();
    }
}
