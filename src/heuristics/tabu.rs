//! Tabu Search over the 2-opt neighborhood.
//!
//! Grounded in `algorithm/tabu_search.c`: a flat `n*n` tabu table (not a
//! hash map), a full scan of every `i < j` pair each iteration (not
//! first-improvement), an aspiration criterion that allows a tabu move when
//! it would beat the best-known cost, and always applying the best move
//! found even when it is non-improving.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::nearest_neighbor_tour;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::{tour_cost, two_opt_delta};

pub struct TabuConfig {
    pub min_tenure: usize,
    pub max_tenure: usize,
    pub max_stagnation: usize,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for TabuConfig {
    fn default() -> Self {
        TabuConfig { min_tenure: 5, max_tenure: 20, max_stagnation: 200, seed: 0, time_limit: 10.0 }
    }
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &TabuConfig) {
    let instance = incumbent.instance().clone();
    let n = instance.n;
    if n < 4 {
        return;
    }
    let limiter = TimeLimiter::new(config.time_limit);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut tour = nearest_neighbor_tour(&instance, 0);
    two_opt(&mut tour, &instance, &limiter);
    let mut current_cost = tour_cost(&instance, &tour);

    let mut best_tour = tour.clone();
    let mut best_cost = current_cost;

    let mut tabu = vec![0i64; n * n];
    let mut stagnation = 0usize;
    let mut iteration: i64 = 0;

    while !limiter.is_over() && stagnation < config.max_stagnation {
        iteration += 1;
        let mut best_move: Option<(usize, usize, f64)> = None;

        for i in 1..n {
            for j in (i + 1)..n {
                if i == 1 && j == n - 1 {
                    continue;
                }
                let delta = two_opt_delta(&instance, &tour, i, j);
                let candidate_cost = current_cost + delta;
                let is_tabu = tabu[i * n + j] > iteration;
                let aspirated = candidate_cost < best_cost - 1e-9;
                if is_tabu && !aspirated {
                    continue;
                }
                if best_move.map_or(true, |(_, _, bd)| delta < bd) {
                    best_move = Some((i, j, delta));
                }
            }
        }

        let Some((bi, bj, delta)) = best_move else { break };
        tour[bi..=bj].reverse();
        current_cost += delta;

        let tenure = rng.gen_range(config.min_tenure..=config.max_tenure) as i64;
        tabu[bi * n + bj] = iteration + tenure;

        if current_cost < best_cost - 1e-9 {
            best_cost = current_cost;
            best_tour = tour.clone();
            stagnation = 0;
        } else {
            stagnation += 1;
        }
    }

    if incumbent.update_if_better(&best_tour, best_cost) {
        recorder.add(best_cost);
        log::debug!("TabuSearch: improved to {best_cost:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn run_never_worsens_the_incumbent() {
        let inst = Arc::new(Instance::random(20, 0.0, 0.0, 500.0, 14));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        let config = TabuConfig { max_stagnation: 30, time_limit: 2.0, ..Default::default() };
        run(&incumbent, &mut rec, &config);
        assert!(incumbent.get_cost() <= start_cost);
    }

    #[test]
    fn run_is_noop_on_tiny_instances() {
        let inst = Arc::new(Instance::random(3, 0.0, 0.0, 500.0, 15));
        let incumbent = Incumbent::identity(inst);
        let mut rec = CostRecorder::new();
        run(&incumbent, &mut rec, &TabuConfig::default());
        assert_eq!(rec.count(), 0);
    }
}
