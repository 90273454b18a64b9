//! No-op MIP Collaborator Facade used when the crate is built without the
//! `gurobi` feature.
//!
//! Grounded in the original's non-CPLEX fallback stubs in
//! `cplex_solver_wrapper.c` (`return -1`/`0`/`false`/`NULL` when
//! `ENABLE_CPLEX` is not defined) and the teacher crate's own
//! `gurobi_stub` module.

use crate::error::TspError;
use crate::instance::Instance;

/// Stand-in for the real MIP model. Every builder call is a no-op;
/// `optimize` always fails, matching "Gurobi feature not enabled".
pub struct MipModel<'a> {
    instance: &'a Instance,
}

impl<'a> MipModel<'a> {
    pub fn new(instance: &'a Instance) -> Result<Self, TspError> {
        Ok(MipModel { instance })
    }

    pub fn add_mip_start(&mut self, _tour: &[usize]) {}

    pub fn fix_edge(&mut self, _u: usize, _v: usize) {}

    pub fn add_local_branching_constraint(&mut self, _tour: &[usize], _k: usize) {}

    pub fn set_time_limit(&mut self, _seconds: f64) {}

    pub fn optimize(&mut self) -> Result<(), TspError> {
        let _ = self.instance;
        Err(TspError::Mip("Gurobi feature not enabled in this build".to_string()))
    }

    pub fn has_solution(&self) -> bool {
        false
    }

    pub fn extract_solution(&self) -> Option<(Vec<usize>, f64)> {
        None
    }

    pub fn fractional_x(&self) -> Option<Vec<f64>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Node;

    #[test]
    fn optimize_always_fails_without_the_gurobi_feature() {
        let inst = Instance::from_nodes("t", vec![Node::new(0.0, 0.0), Node::new(1.0, 1.0)]).unwrap();
        let mut model = MipModel::new(&inst).unwrap();
        assert!(model.optimize().is_err());
        assert!(!model.has_solution());
    }
}
