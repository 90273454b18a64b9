//! Branch-and-cut: build the model, warm-start from the current incumbent,
//! and solve with the lazy subtour-elimination callback installed. On
//! timeout with no incumbent found, bias edge costs toward the fractional
//! solution and run a GRASP+2-opt salvage pass.
//!
//! Grounded in `algorithm/branch_and_cut.c::run_bc`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::grasp_nearest_neighbor_tour;
use crate::exact::MipModel;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

const BIAS_WEIGHT: f64 = 0.9;

pub struct BranchAndCutConfig {
    pub time_limit: f64,
    pub seed: u64,
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &BranchAndCutConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);

    let mut model = match MipModel::new(&instance) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("BranchAndCut: failed to build MIP model: {e}");
            return;
        }
    };

    let incumbent_cost = incumbent.get_cost();
    if incumbent_cost.is_finite() {
        model.add_mip_start(&incumbent.get_tour_copy());
    }
    model.set_time_limit(limiter.get_remaining());

    if model.optimize().is_ok() && model.has_solution() {
        if let Some((tour, cost)) = model.extract_solution() {
            if incumbent.update_if_better(&tour, cost) {
                recorder.add(cost);
                log::info!("BranchAndCut: solution found, cost = {cost:.2}");
            }
            return;
        }
    }

    let Some(x_frac) = model.fractional_x() else {
        log::info!("BranchAndCut: no solution and no fractional values to bias on");
        return;
    };

    log::info!("BranchAndCut: timed out without an integer solution, running biased salvage pass");
    let n = instance.n;
    let biased = biased_instance(&instance, &x_frac, n);

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut tour = grasp_nearest_neighbor_tour(&biased, 0, 5, 0.2, &mut rng);
    two_opt(&mut tour, &biased, &limiter);
    let cost = tour_cost(&instance, &tour);
    if incumbent.update_if_better(&tour, cost) {
        recorder.add(cost);
        log::info!("BranchAndCut: salvaged tour, cost = {cost:.2}");
    }
}

/// Build a copy of `instance` whose costs are biased toward edges Gurobi's
/// relaxation favored: `c'_{ij} = c_{ij} * (1 - BIAS_WEIGHT * x_frac[i,j])`.
fn biased_instance(instance: &crate::instance::Instance, x_frac: &[f64], n: usize) -> crate::instance::Instance {
    let mut biased = instance.clone();
    for i in 0..n {
        for j in 0..n {
            if i != j {
                biased.costs[i * n + j] = instance.costs[i * n + j] * (1.0 - BIAS_WEIGHT * x_frac[i * n + j]);
            }
        }
    }
    biased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    #[test]
    fn biased_instance_keeps_the_same_dimension() {
        let inst = Instance::random(10, 0.0, 0.0, 100.0, 1);
        let x = vec![0.0; inst.n * inst.n];
        let biased = biased_instance(&inst, &x, inst.n);
        assert_eq!(biased.n, inst.n);
        assert_eq!(biased.costs, inst.costs);
    }
}
