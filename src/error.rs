//! Error types for the planner.
//!
//! Non-optimal solver outcomes are not errors; they are reported through
//! [`crate::Outcome::NotOptimal`]. Only broken configuration and solver output
//! that cannot be decoded end up here.

use std::path::PathBuf;

use thiserror::Error;

use crate::solver::SolveStatus;

/// Top-level error type returned by [`crate::plan`].
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Loading or validating a scenario failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid scenario TOML: {0}")]
    ParseStr(#[from] toml::de::Error),

    /// A cost parameter is outside its meaningful range.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The solver returned a status its output does not back up.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver reported {status} but returned no primal solution")]
    MissingSolution { status: SolveStatus },
}

/// An optimal solution could not be turned into an itinerary.
#[derive(Debug, Error)]
pub enum ReportError {
    /// None of the mutually exclusive binaries of a choice rounded to 1.
    #[error("no {choice} option selected in the optimal solution")]
    NoSelection { choice: &'static str },

    /// The solution has no value for a variable of the trip model.
    #[error("solution carries no value for variable {name}")]
    MissingValue { name: String },
}
