//! Thin CLI configuration, described only at its interface per this crate's
//! scope (arg-parsing internals are `clap`'s concern, not ours).
//!
//! Grounded in the teacher crate's `main.rs::Cli`/`Commands`/`Algorithm`
//! enums, trimmed to this crate's plain-TSP algorithm catalog.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tsp-solver", about = "Symmetric Euclidean TSP solver framework")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Seed driving every randomized component (construction, metaheuristics).
    #[arg(long, global = true, default_value_t = 0)]
    pub seed: u64,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single instance with one algorithm.
    Solve {
        #[arg(long)]
        instance: String,
        #[arg(long, value_enum)]
        algorithm: Algorithm,
        #[arg(long, default_value_t = 10.0)]
        time_limit: f64,
        #[arg(long)]
        output: Option<String>,
    },
    /// Run every algorithm against one or more instances and report statistics.
    Benchmark {
        #[arg(long, num_args = 1..)]
        instances: Vec<String>,
        #[arg(long, default_value_t = 10.0)]
        time_limit: f64,
        #[arg(long)]
        csv: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    NearestNeighbor,
    ExtraMileage,
    Grasp,
    Tabu,
    Vns,
    Genetic,
    Benders,
    BranchAndCut,
    HardFixing,
    LocalBranching,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::NearestNeighbor => "NearestNeighbor",
            Algorithm::ExtraMileage => "ExtraMileage",
            Algorithm::Grasp => "Grasp",
            Algorithm::Tabu => "Tabu",
            Algorithm::Vns => "Vns",
            Algorithm::Genetic => "Genetic",
            Algorithm::Benders => "Benders",
            Algorithm::BranchAndCut => "BranchAndCut",
            Algorithm::HardFixing => "HardFixing",
            Algorithm::LocalBranching => "LocalBranching",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }
}
