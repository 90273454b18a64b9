//! Local Branching matheuristic: warm-start, then repeatedly re-solve a
//! fresh MIP constrained to stay within Hamming distance `k` of the current
//! tour, moving the center whenever an improvement is found.
//!
//! Grounded in `algorithm/local_branching.c`.

use crate::exact::warm_start::{run_warm_start, HeuristicKind};
use crate::exact::MipModel;
use crate::incumbent::Incumbent;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;

pub struct LocalBranchingConfig {
    pub k: usize,
    pub heuristic_type: HeuristicKind,
    pub heuristic_time_ratio: f64,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for LocalBranchingConfig {
    fn default() -> Self {
        LocalBranchingConfig {
            k: 10,
            heuristic_type: HeuristicKind::Vns,
            heuristic_time_ratio: 0.3,
            seed: 0,
            time_limit: 60.0,
        }
    }
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &LocalBranchingConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);

    let heuristic_time = (config.time_limit * config.heuristic_time_ratio).clamp(2.0, config.time_limit);
    run_warm_start(incumbent, recorder, config.heuristic_type, heuristic_time, config.seed);

    if limiter.is_over() {
        return;
    }

    let mut current_tour = incumbent.get_tour_copy();
    let mut current_cost = incumbent.get_cost();
    let mut improved = true;
    let mut iteration = 0u32;

    while improved && !limiter.is_over() {
        improved = false;
        iteration += 1;

        let mut model = match MipModel::new(&instance) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("LocalBranching: failed to build MIP model: {e}");
                break;
            }
        };
        model.add_mip_start(&current_tour);
        model.add_local_branching_constraint(&current_tour, config.k);
        model.set_time_limit(limiter.get_remaining());

        if model.optimize().is_ok() && model.has_solution() {
            if let Some((tour, cost)) = model.extract_solution() {
                if cost < current_cost - 1e-6 {
                    current_tour = tour.clone();
                    current_cost = cost;
                    improved = true;
                    if incumbent.update_if_better(&tour, cost) {
                        recorder.add(cost);
                        log::info!("LocalBranching[iter={iteration}]: improved to {cost:.2}");
                    }
                }
            }
        }
    }
}
