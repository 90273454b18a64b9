//! Algorithm Strategy: a flat dispatch record instead of a trait-object
//! hierarchy.
//!
//! Grounded directly in the original C `TspAlgorithm` struct (`name`, a
//! function pointer `run`, an opaque `config` pointer, and destructor/clone
//! hooks). Rust's closures give us the function-pointer-plus-captured-state
//! shape for free, without `unsafe` or `void*`, while keeping the "avoid
//! virtual inheritance" intent spec.md calls out explicitly.

use crate::incumbent::Incumbent;
use crate::recorder::CostRecorder;

/// One runnable strategy: a human-readable name plus the closure that runs
/// it against a shared incumbent. Strategies never return a `Result` here —
/// they either improve the incumbent via `update_if_better` or they don't;
/// failures are logged internally and treated as "no improvement found."
pub struct AlgorithmStrategy<'a> {
    pub name: &'static str,
    run: Box<dyn FnMut(&Incumbent, &mut CostRecorder) + 'a>,
}

impl<'a> AlgorithmStrategy<'a> {
    pub fn new(name: &'static str, run: impl FnMut(&Incumbent, &mut CostRecorder) + 'a) -> Self {
        AlgorithmStrategy { name, run: Box::new(run) }
    }

    pub fn run(&mut self, incumbent: &Incumbent, recorder: &mut CostRecorder) {
        log::info!("running strategy: {}", self.name);
        (self.run)(incumbent, recorder);
        log::info!("strategy {} finished, incumbent cost = {:.2}", self.name, incumbent.get_cost());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use std::sync::Arc;

    #[test]
    fn strategy_run_can_update_the_incumbent() {
        let inst = Arc::new(Instance::random(10, 0.0, 0.0, 100.0, 1));
        let incumbent = Incumbent::identity(inst);
        let mut strategy = AlgorithmStrategy::new("force-improve", |inc, rec| {
            let tour = inc.get_tour_copy();
            if inc.update_if_better(&tour, 0.0) {
                rec.add(0.0);
            }
        });
        let mut recorder = CostRecorder::new();
        strategy.run(&incumbent, &mut recorder);
        assert_eq!(incumbent.get_cost(), 0.0);
        assert_eq!(recorder.count(), 1);
    }
}
