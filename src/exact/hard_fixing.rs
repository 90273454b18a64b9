//! Hard Fixing matheuristic: warm-start with a heuristic, then randomly fix
//! a fraction of the warm-start tour's edges to 1 before handing the
//! (smaller) remaining problem to the MIP facade.
//!
//! Grounded in `algorithm/hard_fixing.c`.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::exact::warm_start::{run_warm_start, HeuristicKind};
use crate::exact::MipModel;
use crate::incumbent::Incumbent;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;

pub struct HardFixingConfig {
    pub fixing_rate: f64,
    pub heuristic_type: HeuristicKind,
    pub heuristic_time_ratio: f64,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for HardFixingConfig {
    fn default() -> Self {
        HardFixingConfig {
            fixing_rate: 0.5,
            heuristic_type: HeuristicKind::Vns,
            heuristic_time_ratio: 0.3,
            seed: 0,
            time_limit: 60.0,
        }
    }
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &HardFixingConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);

    let heuristic_time = (config.time_limit * config.heuristic_time_ratio).clamp(2.0, config.time_limit);
    run_warm_start(incumbent, recorder, config.heuristic_type, heuristic_time, config.seed);

    if limiter.is_over() {
        return;
    }

    let mut model = match MipModel::new(&instance) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("HardFixing: failed to build MIP model: {e}");
            return;
        }
    };

    let tour = incumbent.get_tour_copy();
    model.add_mip_start(&tour);

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let n = tour.len();
    let mut fixed_count = 0usize;
    for i in 0..n {
        let u = tour[i];
        let v = tour[(i + 1) % n];
        if rng.gen::<f64>() < config.fixing_rate {
            model.fix_edge(u, v);
            fixed_count += 1;
        }
    }
    log::debug!("HardFixing: fixed {fixed_count}/{n} tour edges");

    model.set_time_limit(limiter.get_remaining());
    if model.optimize().is_ok() && model.has_solution() {
        if let Some((tour, cost)) = model.extract_solution() {
            if incumbent.update_if_better(&tour, cost) {
                recorder.add(cost);
                log::info!("HardFixing: improved to {cost:.2}");
            }
        }
    }
}
