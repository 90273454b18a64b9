//! Solution Incumbent: the mutex-protected best-known tour shared across
//! concurrent strategies.
//!
//! Grounded in `tsp_solution.c`'s `TspSolutionState` (a pthread-mutex
//! protected `(tour, cost)` pair). The teacher crate's own `Solution` type
//! has no synchronization; this is the direct Rust realization of the
//! original's locking discipline: lock, snapshot or mutate, unlock.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::instance::Instance;
use crate::tour::tour_cost;

const EPSILON: f64 = 1e-6;

/// Result of validating a tour against an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeasibilityResult {
    /// The tour is missing an entry (wrong length, or a node id out of range).
    UninitializedEntry,
    /// A node id appears more than once in the tour.
    DuplicatedEntry,
    /// The tour visits every node exactly once but the recorded cost does not
    /// match the recomputed cost.
    NonMatchingCost,
    Feasible,
}

impl fmt::Display for FeasibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeasibilityResult::UninitializedEntry => "uninitialized entry",
            FeasibilityResult::DuplicatedEntry => "duplicated entry",
            FeasibilityResult::NonMatchingCost => "non-matching cost",
            FeasibilityResult::Feasible => "feasible",
        };
        f.write_str(s)
    }
}

struct IncumbentState {
    tour: Vec<usize>,
    cost: f64,
}

/// Shared, mutex-guarded best-known tour for an instance. Cheap to clone
/// (an `Arc` bump) so every concurrent strategy worker can hold one.
#[derive(Clone)]
pub struct Incumbent {
    instance: Arc<Instance>,
    state: Arc<Mutex<IncumbentState>>,
}

impl Incumbent {
    pub fn new(instance: Arc<Instance>, tour: Vec<usize>, cost: f64) -> Self {
        Incumbent {
            instance,
            state: Arc::new(Mutex::new(IncumbentState { tour, cost })),
        }
    }

    /// Seed an incumbent with the identity tour `[0, 1, ..., n-1]`, matching
    /// the original's `init_solution` default.
    pub fn identity(instance: Arc<Instance>) -> Self {
        let tour: Vec<usize> = (0..instance.n).collect();
        let cost = tour_cost(&instance, &tour);
        Incumbent::new(instance, tour, cost)
    }

    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    pub fn get_cost(&self) -> f64 {
        self.state.lock().unwrap().cost
    }

    pub fn get_tour_copy(&self) -> Vec<usize> {
        self.state.lock().unwrap().tour.clone()
    }

    /// Replace the incumbent iff `cost` strictly improves on the current one
    /// by more than `EPSILON`. Returns whether the replacement happened.
    pub fn update_if_better(&self, tour: &[usize], cost: f64) -> bool {
        let mut state = self.state.lock().unwrap();
        if cost < state.cost - EPSILON {
            state.tour = tour.to_vec();
            state.cost = cost;
            true
        } else {
            false
        }
    }

    /// Validate the *current* incumbent: every node visited exactly once and
    /// the recorded cost matches a fresh recomputation.
    pub fn is_feasible(&self) -> FeasibilityResult {
        let state = self.state.lock().unwrap();
        check_feasibility(&self.instance, &state.tour, state.cost)
    }

    /// Run `strategy` against this incumbent and report whether it is left
    /// in a feasible state.
    pub fn solve(&self, strategy: &mut crate::strategy::AlgorithmStrategy, recorder: &mut crate::recorder::CostRecorder) -> FeasibilityResult {
        strategy.run(self, recorder);
        self.is_feasible()
    }
}

/// Standalone feasibility check usable on any candidate tour, not just the
/// live incumbent (e.g. checking a MIP-extracted tour before installing it).
pub fn check_feasibility(instance: &Instance, tour: &[usize], cost: f64) -> FeasibilityResult {
    if tour.len() != instance.n || tour.iter().any(|&node| node >= instance.n) {
        return FeasibilityResult::UninitializedEntry;
    }
    let mut seen = vec![false; instance.n];
    for &node in tour {
        if seen[node] {
            return FeasibilityResult::DuplicatedEntry;
        }
        seen[node] = true;
    }
    let recomputed = tour_cost(instance, tour);
    if (recomputed - cost).abs() > EPSILON {
        return FeasibilityResult::NonMatchingCost;
    }
    FeasibilityResult::Feasible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Node;

    fn square() -> Arc<Instance> {
        Arc::new(
            Instance::from_nodes(
                "square",
                vec![
                    Node::new(0.0, 0.0),
                    Node::new(0.0, 1.0),
                    Node::new(1.0, 1.0),
                    Node::new(1.0, 0.0),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn identity_incumbent_is_feasible() {
        let inst = square();
        let inc = Incumbent::identity(inst);
        assert_eq!(inc.is_feasible(), FeasibilityResult::Feasible);
    }

    #[test]
    fn update_if_better_rejects_worse_or_equal() {
        let inst = square();
        let inc = Incumbent::identity(inst);
        let cost = inc.get_cost();
        assert!(!inc.update_if_better(&[0, 1, 2, 3], cost));
        assert!(!inc.update_if_better(&[0, 1, 2, 3], cost + 1.0));
    }

    #[test]
    fn update_if_better_accepts_strict_improvement() {
        let inst = square();
        let inc = Incumbent::new(inst, vec![0, 2, 1, 3], 0.0);
        let new_cost = 4.0;
        inc.state.lock().unwrap().cost = 100.0; // force a worse starting cost
        assert!(inc.update_if_better(&[0, 1, 2, 3], new_cost));
        assert_eq!(inc.get_cost(), new_cost);
    }

    #[test]
    fn duplicated_entry_is_detected() {
        let inst = square();
        assert_eq!(
            check_feasibility(&inst, &[0, 0, 2, 3], 4.0),
            FeasibilityResult::DuplicatedEntry
        );
    }

    #[test]
    fn non_matching_cost_is_detected() {
        let inst = square();
        assert_eq!(
            check_feasibility(&inst, &[0, 1, 2, 3], 999.0),
            FeasibilityResult::NonMatchingCost
        );
    }

    #[test]
    fn solve_runs_the_strategy_and_reports_feasibility() {
        let inst = square();
        let inc = Incumbent::identity(inst);
        let mut ran = false;
        let mut strategy = crate::strategy::AlgorithmStrategy::new("noop", |_incumbent, _rec| {
            ran = true;
        });
        let mut recorder = crate::recorder::CostRecorder::new();
        let result = inc.solve(&mut strategy, &mut recorder);
        assert_eq!(result, FeasibilityResult::Feasible);
        assert!(ran);
    }
}
