//! Benders-style decomposition loop: solve the degree-2 relaxation plus
//! lazily-separated subtour constraints, install the tour if one is found,
//! otherwise patch a non-Hamiltonian edge set into a feasible tour with 2-opt
//! before giving up.
//!
//! Grounded in `algorithm/benders_loop.c::run_benders`. The facade's
//! `optimize()` already performs lazy subtour separation internally (see
//! `exact::mip`), so this loop's outer iteration collapses to a single solve
//! attempt per call; the salvage fallback on timeout is preserved verbatim.

use crate::exact::MipModel;
use crate::incumbent::Incumbent;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

pub struct BendersConfig {
    pub time_limit: f64,
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &BendersConfig) {
    let instance = incumbent.instance().clone();
    let limiter = TimeLimiter::new(config.time_limit);

    let mut model = match MipModel::new(&instance) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("Benders: failed to build MIP model: {e}");
            return;
        }
    };
    model.set_time_limit(limiter.get_remaining());

    if model.optimize().is_ok() && model.has_solution() {
        if let Some((tour, cost)) = model.extract_solution() {
            if incumbent.update_if_better(&tour, cost) {
                recorder.add(cost);
                log::info!("Benders: optimal tour found, cost = {cost:.2}");
            }
            return;
        }
    }

    log::info!("Benders: no Hamiltonian solution within budget, salvaging fractional edges");
    if let Some(x) = model.fractional_x() {
        let n = instance.n;
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .filter(|&(u, v)| x[u * n + v] > 0.5)
            .collect();
        if let Some(mut tour) = patch_to_hamiltonian(n, &edges) {
            two_opt(&mut tour, &instance, &limiter);
            let cost = tour_cost(&instance, &tour);
            if incumbent.update_if_better(&tour, cost) {
                recorder.add(cost);
                log::info!("Benders: salvaged tour, cost = {cost:.2}");
            }
        }
    }
}

/// Greedily stitch whatever path/cycle fragments `edges` forms into a single
/// Hamiltonian cycle by chaining fragment endpoints together.
fn patch_to_hamiltonian(n: usize, edges: &[(usize, usize)]) -> Option<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in edges {
        if adjacency[u].len() < 2 && adjacency[v].len() < 2 {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = 0usize;
    let mut prev = usize::MAX;
    for _ in 0..n {
        tour.push(current);
        visited[current] = true;
        let next = adjacency[current]
            .iter()
            .copied()
            .find(|&c| c != prev && !visited[c])
            .or_else(|| (0..n).find(|&c| !visited[c]));
        prev = current;
        current = next?;
    }
    Some(tour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_to_hamiltonian_covers_every_node_even_with_no_edges() {
        let tour = patch_to_hamiltonian(5, &[]).unwrap();
        let mut seen = vec![false; 5];
        for v in tour {
            seen[v] = true;
        }
        assert!(seen.iter().all(|&b| b));
    }
}
