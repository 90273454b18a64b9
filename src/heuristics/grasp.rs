//! GRASP: repeated randomized-greedy construction plus 2-opt, keeping the
//! best tour seen until a stagnation limit or the time budget is exhausted.
//!
//! Grounded in `algorithm/grasp.c`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::grasp_nearest_neighbor_tour;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

pub struct GraspConfig {
    pub rcl_size: usize,
    pub probability: f64,
    pub max_stagnation: usize,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for GraspConfig {
    fn default() -> Self {
        GraspConfig { rcl_size: 5, probability: 0.2, max_stagnation: 200, seed: 0, time_limit: 10.0 }
    }
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &GraspConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut best_cost = f64::INFINITY;
    let mut stagnation = 0;
    let mut start = 0usize;

    while !limiter.is_over() && stagnation < config.max_stagnation {
        let mut tour = grasp_nearest_neighbor_tour(
            &instance,
            start % instance.n,
            config.rcl_size,
            config.probability,
            &mut rng,
        );
        two_opt(&mut tour, &instance, &limiter);
        let cost = tour_cost(&instance, &tour);

        if cost < best_cost - 1e-9 {
            best_cost = cost;
            stagnation = 0;
        } else {
            stagnation += 1;
        }

        if incumbent.update_if_better(&tour, cost) {
            recorder.add(cost);
            log::debug!("GRASP: improved to {cost:.2}");
        }
        start += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn run_terminates_and_never_worsens_the_incumbent() {
        let inst = Arc::new(Instance::random(25, 0.0, 0.0, 500.0, 13));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        let config = GraspConfig { max_stagnation: 20, time_limit: 2.0, ..Default::default() };
        run(&incumbent, &mut rec, &config);
        assert!(incumbent.get_cost() <= start_cost);
    }
}
