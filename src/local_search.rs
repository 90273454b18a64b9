//! Local Search: the canonical 2-opt kernel shared by every constructive and
//! metaheuristic strategy.
//!
//! Grounded in `common/local_search.c::two_opt`: first-improvement with a
//! restart from `i = 1` whenever an improving move is applied, not a single
//! best-improvement sweep. This supersedes the teacher crate's
//! clone-and-recompute `TwoOptSearch`.

use crate::instance::Instance;
use crate::time_limiter::TimeLimiter;
use crate::tour::two_opt_delta;

/// Run 2-opt to a local optimum (or until `limiter` runs out), mutating
/// `tour` in place. Returns the cumulative cost delta applied (always `<= 0`).
pub fn two_opt(tour: &mut [usize], instance: &Instance, limiter: &TimeLimiter) -> f64 {
    let n = tour.len();
    if n < 4 {
        return 0.0;
    }
    let mut total_delta = 0.0;
    let mut i = 1;
    while i < n - 1 {
        if limiter.is_over() {
            break;
        }
        let mut improved_here = false;
        for j in (i + 1)..n {
            // Skip the degenerate pair that would reverse the whole tour.
            if i == 1 && j == n - 1 {
                continue;
            }
            let delta = two_opt_delta(instance, tour, i, j);
            if delta < -1e-9 {
                tour[i..=j].reverse();
                total_delta += delta;
                improved_here = true;
                break;
            }
        }
        if improved_here {
            i = 1;
        } else {
            i += 1;
        }
    }
    total_delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Node;

    #[test]
    fn two_opt_untangles_a_crossed_tour() {
        // A square visited in crossed order 0-2-1-3 has a worse cost than
        // the non-crossed 0-1-2-3 cycle; 2-opt should find the improvement.
        let inst = Instance::from_nodes(
            "square",
            vec![
                Node::new(0.0, 0.0),
                Node::new(0.0, 1.0),
                Node::new(1.0, 1.0),
                Node::new(1.0, 0.0),
            ],
        )
        .unwrap();
        let mut tour = vec![0, 2, 1, 3];
        let limiter = TimeLimiter::new(5.0);
        let delta = two_opt(&mut tour, &inst, &limiter);
        assert!(delta < 0.0);
        let final_cost: f64 = crate::tour::tour_cost(&inst, &tour);
        assert!((final_cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn two_opt_is_noop_on_tiny_tours() {
        let inst = Instance::from_nodes("pair", vec![Node::new(0.0, 0.0), Node::new(1.0, 0.0)]).unwrap();
        let mut tour = vec![0, 1];
        let limiter = TimeLimiter::new(1.0);
        assert_eq!(two_opt(&mut tour, &inst, &limiter), 0.0);
    }

    #[test]
    fn two_opt_stops_when_time_is_over() {
        let inst = Instance::random(60, 0.0, 0.0, 1000.0, 3);
        let mut tour: Vec<usize> = (0..inst.n).collect();
        let limiter = TimeLimiter::new(0.0);
        assert_eq!(two_opt(&mut tour, &inst, &limiter), 0.0);
    }
}
