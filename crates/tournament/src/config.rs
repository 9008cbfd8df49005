//! Simulation settings, loadable from TOML
//!
//! Every field is optional in the file; command line flags override it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::elo::{EloModel, ELO_SCALE};
use crate::error::{Error, Result};
use crate::simulator::TieBreak;

/// Default number of simulated tournaments
pub const DEFAULT_TRIALS: u64 = 10_000;

/// Default size of the podium being estimated
pub const DEFAULT_TOP_K: usize = 3;

/// Default number of report lines printed
pub const DEFAULT_DISPLAY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of simulated tournaments
    pub trials: u64,
    /// Finish positions counted as a success
    pub top_k: usize,
    /// Seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
    /// Worker threads (rayon default when absent)
    pub threads: Option<usize>,
    /// Rating gap corresponding to 10:1 odds
    pub elo_scale: f64,
    /// Ordering of competitors level on wins within a trial
    pub tie_break: TieBreak,
    /// Report lines to print
    pub display: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            top_k: DEFAULT_TOP_K,
            seed: None,
            threads: None,
            elo_scale: ELO_SCALE,
            tie_break: TieBreak::default(),
            display: DEFAULT_DISPLAY,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::ZeroTrials);
        }
        if self.top_k == 0 {
            return Err(Error::ZeroTopK);
        }
        self.model()?;
        Ok(())
    }

    /// Rating model described by this config
    pub fn model(&self) -> Result<EloModel> {
        EloModel::with_scale(self.elo_scale)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
