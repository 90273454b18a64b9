//! Variable Neighborhood Search: alternate random n-opt "kicks" with 2-opt
//! re-optimization, widening the kick strength on stagnation.
//!
//! Grounded in `algorithm/variable_neighborhood_search.c`.

use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::nearest_neighbor_tour;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::{n_opt_delta, n_opt_move, tour_cost};

pub struct VnsConfig {
    pub min_k: usize,
    pub max_k: usize,
    pub kick_repetition: usize,
    pub max_stagnation: usize,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for VnsConfig {
    fn default() -> Self {
        VnsConfig { min_k: 3, max_k: 10, kick_repetition: 1, max_stagnation: 500, seed: 0, time_limit: 10.0 }
    }
}

/// Pick `k` random, non-contiguous cut indices in `[1, n)` and apply the
/// n-opt move they describe.
fn kick(tour: &mut Vec<usize>, instance: &crate::instance::Instance, k: usize, rng: &mut ChaCha8Rng) -> f64 {
    let n = tour.len();
    if n < 5 || k < 2 {
        return 0.0;
    }
    let k = k.min(n - 2);
    let mut indices: Vec<usize> = sample(rng, n - 1, k).into_iter().map(|v| v + 1).collect();
    indices.sort_unstable();
    indices.dedup();
    // Reject kicks that collapsed to contiguous/degenerate cut sets.
    if indices.len() < 2 || indices.windows(2).any(|w| w[1] == w[0] + 1) {
        return 0.0;
    }
    let delta = n_opt_delta(instance, tour, &indices);
    n_opt_move(tour, &indices);
    delta
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &VnsConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut tour = nearest_neighbor_tour(&instance, 0);
    two_opt(&mut tour, &instance, &limiter);
    let mut best_tour = tour.clone();
    let mut best_cost = tour_cost(&instance, &tour);

    let mut k = config.min_k;
    let mut stagnation = 0usize;

    while !limiter.is_over() && stagnation < config.max_stagnation {
        let mut candidate = best_tour.clone();
        for _ in 0..config.kick_repetition {
            kick(&mut candidate, &instance, k, &mut rng);
        }
        two_opt(&mut candidate, &instance, &limiter);
        let candidate_cost = tour_cost(&instance, &candidate);

        if candidate_cost < best_cost - 1e-9 {
            best_cost = candidate_cost;
            best_tour = candidate;
            stagnation = 0;
            k = config.min_k;
        } else {
            stagnation += 1;
            k = (k + 1).min(config.max_k);
        }
    }

    if incumbent.update_if_better(&best_tour, best_cost) {
        recorder.add(best_cost);
        log::debug!("VNS: improved to {best_cost:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn run_never_worsens_the_incumbent() {
        let inst = Arc::new(Instance::random(25, 0.0, 0.0, 500.0, 16));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        let config = VnsConfig { max_stagnation: 10, time_limit: 2.0, ..Default::default() };
        run(&incumbent, &mut rec, &config);
        assert!(incumbent.get_cost() <= start_cost);
    }
}
