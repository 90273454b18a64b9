//! Exact and matheuristic strategies built on the MIP Collaborator Facade.

pub mod separator;
pub mod warm_start;
pub mod benders;
pub mod branch_and_cut;
pub mod hard_fixing;
pub mod local_branching;

#[cfg(feature = "gurobi")]
mod mip;
#[cfg(feature = "gurobi")]
pub use mip::*;

#[cfg(not(feature = "gurobi"))]
mod mip_stub;
#[cfg(not(feature = "gurobi"))]
pub use mip_stub::*;
