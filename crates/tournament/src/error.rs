//! Error type shared by the simulation core and its file-facing helpers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a round-robin needs at least 2 competitors, got {found}")]
    TooFewCompetitors { found: usize },

    #[error("competitor '{name}' has a non-finite rating ({rating})")]
    NonFiniteRating { name: String, rating: f64 },

    #[error("competitor '{0}' appears more than once in the roster")]
    DuplicateCompetitor(String),

    #[error("competitor at position {0} has an empty name")]
    EmptyName(usize),

    #[error("trial count must be at least 1")]
    ZeroTrials,

    #[error("top-K must be at least 1")]
    ZeroTopK,

    #[error("Elo scale must be finite and positive, got {0}")]
    InvalidScale(f64),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for configuration mistakes the caller has to fix before retrying.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::TooFewCompetitors { .. }
                | Error::NonFiniteRating { .. }
                | Error::DuplicateCompetitor(_)
                | Error::EmptyName(_)
                | Error::ZeroTrials
                | Error::ZeroTopK
                | Error::InvalidScale(_)
        )
    }
}
