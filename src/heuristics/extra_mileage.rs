//! Extra Mileage: single-shot cheapest-insertion construction, 2-opt'd once.
//!
//! Grounded in `algorithm/extra_mileage.c::run_em` — unlike the other
//! heuristics this one does not iterate; it constructs, improves, and
//! installs the result exactly once.

use crate::construction::extra_mileage_tour;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, time_limit: f64) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(time_limit);

    let mut tour = extra_mileage_tour(&instance);
    two_opt(&mut tour, &instance, &limiter);
    let cost = tour_cost(&instance, &tour);

    if incumbent.update_if_better(&tour, cost) {
        recorder.add(cost);
        log::debug!("ExtraMileage: improved to {cost:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn run_installs_a_feasible_improving_tour() {
        let inst = Arc::new(Instance::random(20, 0.0, 0.0, 500.0, 12));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        run(&incumbent, &mut rec, 5.0);
        assert!(incumbent.get_cost() <= start_cost);
        assert_eq!(
            incumbent.is_feasible(),
            crate::incumbent::FeasibilityResult::Feasible
        );
    }
}
