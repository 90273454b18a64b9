//! Tour Utilities: cost evaluation and incremental move primitives shared by
//! every construction heuristic, local search kernel, and metaheuristic.
//!
//! Grounded in `tsp_math_util.c`'s `calculate_tour_cost`, `compute_n_opt_cost`
//! and `compute_n_opt_move` — true incremental deltas, not clone-and-recompute.

use crate::instance::Instance;

/// Build `pos(i, j)` of the triangular edge-variable index used by the MIP
/// facade, for `i < j < n`. `pos(i, j) = i*n + j - (i+1)(i+2)/2`.
#[inline]
pub fn edge_pos(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i < j && j < n);
    i * n + j - (i + 1) * (i + 2) / 2
}

/// Total length of a closed tour (`tour[0]` is implicitly revisited after
/// `tour[last]`).
pub fn tour_cost(instance: &Instance, tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut cost = 0.0;
    for w in tour.windows(2) {
        cost += instance.distance(w[0], w[1]);
    }
    cost += instance.distance(tour[tour.len() - 1], tour[0]);
    cost
}

/// Reverse the segment `tour[i..=j]` in place (the classic 2-opt move).
pub fn reverse_segment(tour: &mut [usize], i: usize, j: usize) {
    tour[i..=j].reverse();
}

/// Cost delta of the 2-opt move that removes edges `(tour[i-1],tour[i])` and
/// `(tour[j],tour[j+1])` and reconnects by reversing `tour[i..=j]`. Indices
/// are into a tour whose `tour[n] == tour[0]` wrap is handled by the caller
/// passing an open (non-closed) slice of length `n`.
pub fn two_opt_delta(instance: &Instance, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[(i + n - 1) % n];
    let b = tour[i];
    let c = tour[j];
    let d = tour[(j + 1) % n];
    instance.distance(a, c) + instance.distance(b, d)
        - (instance.distance(a, b) + instance.distance(c, d))
}

/// Cost delta of removing the `m = edges_to_remove.len()` edges
/// `(tour[e_k], tour[e_k+1])` for each `e_k` in `edges_to_remove` (ascending,
/// distinct) and reconnecting the resulting `m` segments by reversing
/// between consecutive cut points — the generalized n-opt move used by Tabu
/// Search and VNS kicks. Ported directly from `compute_n_opt_cost`.
///
/// Precondition: `edges_to_remove` must be sorted ascending and hold at
/// least 2 entries. This is not checked; callers that violate it get a
/// nonsensical delta, matching the original C implementation's documented
/// (but unenforced) precondition.
pub fn n_opt_delta(instance: &Instance, tour: &[usize], edges_to_remove: &[usize]) -> f64 {
    let n = tour.len();
    let m = edges_to_remove.len();
    let mut delta = 0.0;

    for &e in edges_to_remove {
        let u = tour[e];
        let v = tour[(e + 1) % n];
        delta -= instance.distance(u, v);
    }

    for i in 1..(m - 1) {
        let start = (edges_to_remove[i - 1] + 1) % n;
        let end = edges_to_remove[(i + 1) % m];
        delta += instance.distance(tour[start], tour[end]);
    }

    // Connect the first segment (not inverted) to the second segment.
    delta += instance.distance(tour[edges_to_remove[0]], tour[edges_to_remove[1]]);

    // Connect the last segment back to the first segment.
    let start = (edges_to_remove[m - 2] + 1) % n;
    let end = (edges_to_remove[m - 1] + 1) % n;
    delta += instance.distance(tour[start], tour[end]);

    delta
}

/// Apply the n-opt move described by [`n_opt_delta`]: for each consecutive
/// pair `(e_k, e_{k+1})` in `edges_to_remove`, reverses `tour[e_k+1..=e_{k+1}]`.
/// Ported directly from `compute_n_opt_move` (`m - 1` reversals, no wrap —
/// ascending order guarantees `e_k + 1 <= e_{k+1}`).
pub fn n_opt_move(tour: &mut [usize], edges_to_remove: &[usize]) {
    let m = edges_to_remove.len();
    for w in 0..(m - 1) {
        let start = edges_to_remove[w] + 1;
        let end = edges_to_remove[w + 1];
        if start > end {
            continue;
        }
        tour[start..=end].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Instance, Node};

    fn square() -> Instance {
        Instance::from_nodes(
            "square",
            vec![
                Node::new(0.0, 0.0),
                Node::new(0.0, 1.0),
                Node::new(1.0, 1.0),
                Node::new(1.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn edge_pos_matches_xpos_formula() {
        let n = 5;
        assert_eq!(edge_pos(0, 1, n), 0);
        assert_eq!(edge_pos(0, 2, n), 1);
        assert_eq!(edge_pos(3, 4, n), 9);
    }

    #[test]
    fn tour_cost_closes_the_loop() {
        let inst = square();
        let cost = tour_cost(&inst, &[0, 1, 2, 3]);
        assert!((cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn two_opt_delta_matches_recompute() {
        let inst = square();
        let tour = vec![0, 2, 1, 3];
        let before = tour_cost(&inst, &tour);
        let delta = two_opt_delta(&inst, &tour, 1, 2);
        let mut after_tour = tour.clone();
        reverse_segment(&mut after_tour, 1, 2);
        let after = tour_cost(&inst, &after_tour);
        assert!((delta - (after - before)).abs() < 1e-9);
    }

    fn pentagon() -> Instance {
        Instance::from_nodes(
            "pentagon",
            vec![
                Node::new(0.0, 0.0),
                Node::new(2.0, 0.0),
                Node::new(3.0, 2.0),
                Node::new(1.0, 3.0),
                Node::new(-1.0, 2.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn n_opt_identity_holds_for_a_two_cut_move() {
        let inst = pentagon();
        let tour = vec![0, 1, 2, 3, 4];
        let edges_to_remove = vec![0, 2];
        let before = tour_cost(&inst, &tour);
        let delta = n_opt_delta(&inst, &tour, &edges_to_remove);

        let mut after_tour = tour.clone();
        n_opt_move(&mut after_tour, &edges_to_remove);
        let after = tour_cost(&inst, &after_tour);

        assert!((after - (before + delta)).abs() < 1e-9);
    }

    #[test]
    fn n_opt_identity_holds_for_a_three_cut_move() {
        let inst = Instance::from_nodes(
            "hexagon",
            vec![
                Node::new(0.0, 0.0),
                Node::new(1.0, 0.0),
                Node::new(2.0, 1.0),
                Node::new(2.0, 2.0),
                Node::new(1.0, 3.0),
                Node::new(0.0, 2.0),
            ],
        )
        .unwrap();
        let tour = vec![0, 1, 2, 3, 4, 5];
        let edges_to_remove = vec![0, 2, 4];
        let before = tour_cost(&inst, &tour);
        let delta = n_opt_delta(&inst, &tour, &edges_to_remove);

        let mut after_tour = tour.clone();
        n_opt_move(&mut after_tour, &edges_to_remove);
        let after = tour_cost(&inst, &after_tour);

        assert!((after - (before + delta)).abs() < 1e-9);
    }
}
