//! Benchmark harness: run the algorithm catalog over one or more instances
//! and aggregate per-algorithm statistics.
//!
//! [SUPPLEMENT] grounded in the teacher crate's `benchmark.rs`, respecialized
//! to the plain-TSP domain (no capacity/profit/PD-TSP fields).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Algorithm;
use crate::exact::{benders, branch_and_cut, hard_fixing, local_branching, warm_start::HeuristicKind};
use crate::heuristics::{extra_mileage, genetic, grasp, nearest_neighbor, tabu, vns};
use crate::incumbent::Incumbent;
use crate::instance::Instance;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub instance_name: String,
    pub algorithm: String,
    pub cost: f64,
    pub time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    pub algorithm: String,
    pub runs: usize,
    pub avg_cost: f64,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub std_cost: f64,
    pub avg_time: f64,
}

pub struct Benchmark {
    results: Vec<AlgorithmResult>,
}

impl Benchmark {
    pub fn new() -> Self {
        Benchmark { results: Vec::new() }
    }

    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Run every algorithm in `catalog` once against `instance`, with
    /// `time_limit` seconds per run.
    pub fn run_on_instance(&mut self, instance: &Instance, catalog: &[Algorithm], time_limit: f64, seed: u64) {
        for &algorithm in catalog {
            let started = TimeLimiter::new(f64::MAX);
            let incumbent = Incumbent::identity(std::sync::Arc::new(instance.clone()));
            let mut recorder = CostRecorder::new();
            run_one(&incumbent, &mut recorder, algorithm, time_limit, seed);
            let cost = incumbent.get_cost();
            self.results.push(AlgorithmResult {
                instance_name: instance.name.clone(),
                algorithm: algorithm.to_string(),
                cost,
                time_seconds: started.elapsed(),
            });
            log::info!("{}: {} -> {:.2}", instance.name, algorithm, cost);
        }
    }

    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut by_algorithm: std::collections::BTreeMap<String, Vec<&AlgorithmResult>> = Default::default();
        for r in &self.results {
            by_algorithm.entry(r.algorithm.clone()).or_default().push(r);
        }

        by_algorithm
            .into_iter()
            .map(|(algorithm, runs)| {
                let costs: Vec<f64> = runs.iter().map(|r| r.cost).collect();
                let n = costs.len() as f64;
                let avg_cost = costs.iter().sum::<f64>() / n;
                let variance = costs.iter().map(|c| (c - avg_cost).powi(2)).sum::<f64>() / n;
                let avg_time = runs.iter().map(|r| r.time_seconds).sum::<f64>() / n;
                AlgorithmStatistics {
                    algorithm,
                    runs: runs.len(),
                    avg_cost,
                    best_cost: costs.iter().cloned().fold(f64::INFINITY, f64::min),
                    worst_cost: costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                    std_cost: variance.sqrt(),
                    avg_time,
                }
            })
            .collect()
    }

    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::error::TspError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| crate::error::TspError::Configuration(e.to_string()))?;
        for r in &self.results {
            writer.serialize(r).map_err(|e| crate::error::TspError::Configuration(e.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

fn run_one(incumbent: &Incumbent, recorder: &mut CostRecorder, algorithm: Algorithm, time_limit: f64, seed: u64) {
    match algorithm {
        Algorithm::NearestNeighbor => nearest_neighbor::run(incumbent, recorder, time_limit),
        Algorithm::ExtraMileage => extra_mileage::run(incumbent, recorder, time_limit),
        Algorithm::Grasp => {
            let config = grasp::GraspConfig { seed, time_limit, ..Default::default() };
            grasp::run(incumbent, recorder, &config);
        }
        Algorithm::Tabu => {
            let config = tabu::TabuConfig { seed, time_limit, ..Default::default() };
            tabu::run(incumbent, recorder, &config);
        }
        Algorithm::Vns => {
            let config = vns::VnsConfig { seed, time_limit, ..Default::default() };
            vns::run(incumbent, recorder, &config);
        }
        Algorithm::Genetic => {
            let config = genetic::GeneticConfig { seed, time_limit, ..Default::default() };
            genetic::run(incumbent, recorder, &config);
        }
        Algorithm::Benders => {
            benders::run(incumbent, recorder, &benders::BendersConfig { time_limit });
        }
        Algorithm::BranchAndCut => {
            branch_and_cut::run(incumbent, recorder, &branch_and_cut::BranchAndCutConfig { time_limit, seed });
        }
        Algorithm::HardFixing => {
            let config = hard_fixing::HardFixingConfig {
                heuristic_type: HeuristicKind::Vns,
                seed,
                time_limit,
                ..Default::default()
            };
            hard_fixing::run(incumbent, recorder, &config);
        }
        Algorithm::LocalBranching => {
            let config = local_branching::LocalBranchingConfig {
                heuristic_type: HeuristicKind::Vns,
                seed,
                time_limit,
                ..Default::default()
            };
            local_branching::run(incumbent, recorder, &config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_are_grouped_per_algorithm() {
        let mut bench = Benchmark::new();
        bench.results.push(AlgorithmResult {
            instance_name: "a".into(),
            algorithm: "NearestNeighbor".into(),
            cost: 10.0,
            time_seconds: 0.1,
        });
        bench.results.push(AlgorithmResult {
            instance_name: "a".into(),
            algorithm: "NearestNeighbor".into(),
            cost: 12.0,
            time_seconds: 0.1,
        });
        let stats = bench.compute_statistics();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].runs, 2);
        assert!((stats[0].avg_cost - 11.0).abs() < 1e-9);
    }
}
