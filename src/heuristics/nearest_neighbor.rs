//! Nearest Neighbor multi-start: try every (or a budgeted subset of) starting
//! node, 2-opt each constructed tour, and keep the best.
//!
//! Grounded in `algorithm/nearest_neighbor.c`'s multi-start `improve`/`solve`.

use crate::construction::nearest_neighbor_tour;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

/// Build and 2-opt a single nearest-neighbor tour from `start`.
pub fn construct(instance: &crate::instance::Instance, start: usize) -> (Vec<usize>, f64) {
    let mut tour = nearest_neighbor_tour(instance, start);
    let limiter = TimeLimiter::new(f64::MAX);
    two_opt(&mut tour, instance, &limiter);
    let cost = tour_cost(instance, &tour);
    (tour, cost)
}

/// Run nearest-neighbor from every starting node within the time budget,
/// 2-opt each, and install the best into `incumbent`.
pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, time_limit: f64) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(time_limit);

    for start in 0..instance.n {
        if limiter.is_over() {
            break;
        }
        let mut tour = nearest_neighbor_tour(&instance, start);
        two_opt(&mut tour, &instance, &limiter);
        let cost = tour_cost(&instance, &tour);
        if incumbent.update_if_better(&tour, cost) {
            recorder.add(cost);
            log::debug!("NN[start={start}]: improved to {cost:.2}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn run_improves_on_or_matches_the_identity_tour() {
        let inst = Arc::new(Instance::random(25, 0.0, 0.0, 500.0, 11));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        run(&incumbent, &mut rec, 5.0);
        assert!(incumbent.get_cost() <= start_cost);
    }
}
