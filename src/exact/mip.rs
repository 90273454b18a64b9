//! MIP Collaborator Facade, backed by Gurobi via the `grb` crate.
//!
//! Model: one binary variable per edge `(i, j)`, `i < j`, indexed by
//! [`crate::tour::edge_pos`] (triangular, not a dense `n x n` matrix — the
//! teacher crate's `exact/gurobi.rs` uses a full matrix and only fakes its
//! lazy callback; this facade follows `cplex_solver_wrapper.c`'s `xpos`
//! scheme and installs a genuine lazy subtour-elimination callback, grounded
//! in `other_examples/.../ykrist-rust-grb tsp_lazy_constraints.rs`).

use fnv::FnvHashMap;
use grb::callback::{Callback, Where};
use grb::prelude::*;

use crate::error::TspError;
use crate::exact::separator::find_connected_components;
use crate::instance::Instance;
use crate::tour::tour_cost;

pub struct MipModel<'a> {
    instance: &'a Instance,
    model: Model,
    vars: FnvHashMap<(usize, usize), Var>,
    solution: Option<(Vec<usize>, f64)>,
}

struct SubtourElimination<'v> {
    vars: &'v FnvHashMap<(usize, usize), Var>,
    n: usize,
    subtours_cut: usize,
}

impl<'v> Callback for SubtourElimination<'v> {
    fn callback(&mut self, w: Where) -> grb::callback::CbResult {
        if let Where::MIPSol(ctx) = w {
            let keys: Vec<(usize, usize)> = self.vars.keys().copied().collect();
            let values = ctx.get_solution(keys.iter().map(|k| &self.vars[k]))?;
            let edges: Vec<(usize, usize)> = keys
                .into_iter()
                .zip(values)
                .filter(|(_, v)| *v > 0.5)
                .map(|(k, _)| k)
                .collect();

            let cc = find_connected_components(self.n, &edges);
            if cc.num_components > 1 {
                for comp in 1..=cc.num_components {
                    let members = cc.members(comp);
                    if members.len() < 2 {
                        continue;
                    }
                    let mut expr = grb::expr::LinExpr::new();
                    for a in 0..members.len() {
                        for b in (a + 1)..members.len() {
                            let (u, v) = (members[a].min(members[b]), members[a].max(members[b]));
                            if let Some(&var) = self.vars.get(&(u, v)) {
                                expr.add_term(1.0, var);
                            }
                        }
                    }
                    ctx.add_lazy(c!(expr <= members.len() - 1))?;
                    self.subtours_cut += 1;
                }
            }
        }
        Ok(())
    }
}

impl<'a> MipModel<'a> {
    pub fn new(instance: &'a Instance) -> Result<Self, TspError> {
        let mut env = Env::new("")?;
        env.set(param::OutputFlag, 0).map_err(mip_err)?;
        let mut model = Model::with_env(&instance.name, env).map_err(mip_err)?;
        model.set_param(param::LazyConstraints, 1).map_err(mip_err)?;

        let n = instance.n;
        let mut vars = FnvHashMap::default();
        for i in 0..n {
            for j in (i + 1)..n {
                let name = format!("x_{i}_{j}");
                let var = add_binvar!(model, obj: instance.distance(i, j), name: &name)
                    .map_err(mip_err)?;
                vars.insert((i, j), var);
            }
        }

        for node in 0..n {
            let mut expr = grb::expr::LinExpr::new();
            for other in 0..n {
                if other == node {
                    continue;
                }
                let (u, v) = (node.min(other), node.max(other));
                expr.add_term(1.0, vars[&(u, v)]);
            }
            model
                .add_constr(&format!("degree_{node}"), c!(expr == 2))
                .map_err(mip_err)?;
        }
        model.update().map_err(mip_err)?;

        Ok(MipModel { instance, model, vars, solution: None })
    }

    fn edge_var(&self, u: usize, v: usize) -> Var {
        let (a, b) = (u.min(v), u.max(v));
        self.vars[&(a, b)]
    }

    pub fn add_mip_start(&mut self, tour: &[usize]) {
        let n = tour.len();
        for i in 0..n {
            let u = tour[i];
            let v = tour[(i + 1) % n];
            let var = self.edge_var(u, v);
            let _ = self.model.set_obj_attr(attr::Start, &var, 1.0);
        }
    }

    pub fn fix_edge(&mut self, u: usize, v: usize) {
        let var = self.edge_var(u, v);
        let _ = self.model.set_obj_attr(attr::LB, &var, 1.0);
        let _ = self.model.set_obj_attr(attr::UB, &var, 1.0);
    }

    /// Require the new solution to stay within Hamming distance `k` of
    /// `tour`'s edge set: `sum_{e in tour} x_e >= |tour| - k`.
    pub fn add_local_branching_constraint(&mut self, tour: &[usize], k: usize) {
        let n = tour.len();
        let mut expr = grb::expr::LinExpr::new();
        for i in 0..n {
            let u = tour[i];
            let v = tour[(i + 1) % n];
            expr.add_term(1.0, self.edge_var(u, v));
        }
        let rhs = n.saturating_sub(k) as f64;
        let _ = self.model.add_constr("local_branching", c!(expr >= rhs));
        let _ = self.model.update();
    }

    pub fn set_time_limit(&mut self, seconds: f64) {
        let _ = self.model.set_param(param::TimeLimit, seconds.max(0.0));
    }

    pub fn optimize(&mut self) -> Result<(), TspError> {
        let n = self.instance.n;
        let mut callback = SubtourElimination { vars: &self.vars, n, subtours_cut: 0 };
        self.model.optimize_with_callback(&mut callback).map_err(mip_err)?;

        let sol_count: i32 = self.model.get_attr(attr::SolCount).unwrap_or(0);
        if sol_count > 0 {
            let edges: Vec<(usize, usize)> = self
                .vars
                .iter()
                .filter_map(|(&(u, v), var)| {
                    let x: f64 = self.model.get_obj_attr(attr::X, var).unwrap_or(0.0);
                    (x > 0.5).then_some((u, v))
                })
                .collect();
            if let Some(tour) = reconstruct_tour(n, &edges) {
                let cost = tour_cost(self.instance, &tour);
                self.solution = Some((tour, cost));
            }
        }
        Ok(())
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    pub fn extract_solution(&self) -> Option<(Vec<usize>, f64)> {
        self.solution.clone()
    }

    /// Per-edge fractional/incumbent values, keyed by `(u, v)` with `u < v`,
    /// available whenever Gurobi reports at least one solution (even a
    /// non-optimal one found before a time limit).
    pub fn fractional_x(&self) -> Option<Vec<f64>> {
        let sol_count: i32 = self.model.get_attr(attr::SolCount).ok()?;
        if sol_count == 0 {
            return None;
        }
        let n = self.instance.n;
        let mut x = vec![0.0; n * n];
        for (&(u, v), var) in &self.vars {
            let val: f64 = self.model.get_obj_attr(attr::X, var).unwrap_or(0.0);
            x[u * n + v] = val;
            x[v * n + u] = val;
        }
        Some(x)
    }
}

fn mip_err(e: grb::Error) -> TspError {
    TspError::Mip(e.to_string())
}

/// Greedily trace a Hamiltonian cycle from an edge set where every node has
/// degree 2, starting at node 0. Returns `None` if the edge set does not
/// form a single cycle through all `n` nodes.
fn reconstruct_tour(n: usize, edges: &[(usize, usize)]) -> Option<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }
    if adjacency.iter().any(|a| a.len() != 2) {
        return None;
    }

    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut current = 0usize;
    let mut prev = usize::MAX;
    for _ in 0..n {
        tour.push(current);
        visited[current] = true;
        let next = adjacency[current]
            .iter()
            .copied()
            .find(|&cand| cand != prev && !visited[cand])
            .or_else(|| adjacency[current].iter().copied().find(|&cand| cand != prev));
        match next {
            Some(next) if !visited[next] || tour.len() == n => {
                prev = current;
                current = next;
            }
            _ => break,
        }
    }
    (tour.len() == n).then_some(tour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct_tour_traces_a_simple_cycle() {
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 0)];
        let tour = reconstruct_tour(4, &edges).unwrap();
        assert_eq!(tour.len(), 4);
    }

    #[test]
    fn reconstruct_tour_rejects_non_cycle_edge_sets() {
        let edges = vec![(0, 1), (1, 2)];
        assert!(reconstruct_tour(4, &edges).is_none());
    }
}
