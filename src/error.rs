//! Crate-wide error taxonomy.
//!
//! Hot inner loops (2-opt, n-opt, construction) never return `Result` — they
//! signal failure with sentinel `Option`/`bool` values and let the caller
//! decide. `TspError` exists for the boundary layers: configuration parsing,
//! instance/solution file I/O, and MIP solver plumbing.

use std::fmt;

use crate::incumbent::FeasibilityResult;

/// Errors surfaced at the crate's external boundaries.
#[derive(Debug, Clone)]
pub enum TspError {
    /// A CLI argument or config value failed validation.
    Configuration(String),
    /// An instance file could not be parsed.
    InstanceLoad(String),
    /// A solution file could not be parsed or round-tripped.
    SolutionLoad(String),
    /// An allocation precondition failed (e.g. a zero-node instance).
    Allocation(String),
    /// An algorithm strategy aborted internally.
    Algorithm(String),
    /// A solution failed a feasibility check.
    Feasibility(FeasibilityResult),
    /// The MIP collaborator (Gurobi) reported an error.
    Mip(String),
}

impl fmt::Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TspError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            TspError::InstanceLoad(msg) => write!(f, "failed to load instance: {msg}"),
            TspError::SolutionLoad(msg) => write!(f, "failed to load solution: {msg}"),
            TspError::Allocation(msg) => write!(f, "allocation error: {msg}"),
            TspError::Algorithm(msg) => write!(f, "algorithm error: {msg}"),
            TspError::Feasibility(res) => write!(f, "infeasible solution: {res}"),
            TspError::Mip(msg) => write!(f, "MIP solver error: {msg}"),
        }
    }
}

impl std::error::Error for TspError {}

impl From<std::io::Error> for TspError {
    fn from(e: std::io::Error) -> Self {
        TspError::InstanceLoad(e.to_string())
    }
}

pub type TspResult<T> = Result<T, TspError>;
