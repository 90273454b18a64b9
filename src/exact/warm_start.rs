//! Warm-Start Bridge: run one heuristic to seed the incumbent before an
//! exact/matheuristic strategy takes over.
//!
//! Grounded in `exact/matheuristic_utils.c::matheuristic_run_warm_start` — a
//! dispatch over heuristic kind with documented per-kind defaults applied
//! whenever the caller doesn't override them.

use crate::heuristics::{extra_mileage, genetic, grasp, nearest_neighbor, tabu, vns};
use crate::incumbent::Incumbent;
use crate::recorder::CostRecorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    NearestNeighbor,
    ExtraMileage,
    Tabu,
    Grasp,
    Genetic,
    Vns,
}

impl Default for HeuristicKind {
    /// The original falls through to VNS when no heuristic type is given.
    fn default() -> Self {
        HeuristicKind::Vns
    }
}

pub fn run_warm_start(
    incumbent: &Incumbent,
    recorder: &mut CostRecorder,
    kind: HeuristicKind,
    time_limit: f64,
    seed: u64,
) {
    match kind {
        HeuristicKind::NearestNeighbor => {
            nearest_neighbor::run(incumbent, recorder, time_limit);
        }
        HeuristicKind::ExtraMileage => {
            extra_mileage::run(incumbent, recorder, time_limit);
        }
        HeuristicKind::Tabu => {
            let config = tabu::TabuConfig {
                min_tenure: 5,
                max_tenure: 20,
                max_stagnation: 200,
                seed,
                time_limit,
            };
            tabu::run(incumbent, recorder, &config);
        }
        HeuristicKind::Grasp => {
            let config = grasp::GraspConfig { rcl_size: 5, probability: 0.2, max_stagnation: 200, seed, time_limit };
            grasp::run(incumbent, recorder, &config);
        }
        HeuristicKind::Genetic => {
            let config = genetic::GeneticConfig {
                population_size: 100,
                elite_count: 1,
                mutation_rate: 0.1,
                crossover_cut_min_ratio: 25,
                crossover_cut_max_ratio: 75,
                tournament_size: 5,
                init_grasp_percent: 100,
                seed,
                time_limit,
            };
            genetic::run(incumbent, recorder, &config);
        }
        HeuristicKind::Vns => {
            let config = vns::VnsConfig {
                min_k: 3,
                max_k: 10,
                kick_repetition: 1,
                max_stagnation: 500,
                seed,
                time_limit,
            };
            vns::run(incumbent, recorder, &config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn warm_start_never_worsens_the_incumbent() {
        let inst = Arc::new(Instance::random(20, 0.0, 0.0, 500.0, 20));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        run_warm_start(&incumbent, &mut rec, HeuristicKind::NearestNeighbor, 2.0, 1);
        assert!(incumbent.get_cost() <= start_cost);
    }

    #[test]
    fn default_kind_is_vns() {
        assert_eq!(HeuristicKind::default(), HeuristicKind::Vns);
    }
}
