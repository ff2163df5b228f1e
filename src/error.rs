//! Crate-level error types.

use crate::ip::SolverStatus;
use thiserror::Error;

/// Errors that abort a comparison run.
///
/// Per-rule parse and binding failures are deliberately not represented
/// here: they are collected as [`RuleError`](crate::heuristics::RuleError)
/// values in the run outcome and never abort the other rules. A heuristic
/// that cannot decide a comparison is data (`NotSure`), not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The proposition was `NotSure`, which no selection can prove.
    #[error("proposition NOT_SURE cannot be verified")]
    UnverifiableProposition,

    /// The exact strategy's solver finished without a usable solution.
    #[error("solver finished with status {status:?}")]
    Solver {
        /// Terminal status reported by the backend.
        status: SolverStatus,
    },

    /// The integer-program model failed validation.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A strategy configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The brute-force candidate pool exceeds the configured cap.
    #[error("{count} candidates exceed the brute-force cap of {max}")]
    TooManyCandidates {
        /// Size of the filtered candidate pool.
        count: usize,
        /// Configured cap.
        max: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
