//! TSP solver framework.
//!
//! A solver for the symmetric Euclidean Traveling Salesman Problem built
//! around a shared instance/incumbent core, a common local search kernel,
//! and a family of construction heuristics, metaheuristics, and exact /
//! matheuristic strategies that share that core through a flat strategy
//! record instead of trait-object dispatch.
//!
//! # Example
//!
//! ```no_run
//! use tsp_solver::instance::Instance;
//! use tsp_solver::incumbent::Incumbent;
//! use tsp_solver::heuristics::nearest_neighbor;
//! use std::sync::Arc;
//!
//! let instance = Arc::new(Instance::random(200, 0.0, 0.0, 1000.0, 42));
//! let (tour, cost) = nearest_neighbor::construct(&instance, 0);
//! let incumbent = Incumbent::new(instance, tour, cost);
//! println!("Initial cost: {:.2}", incumbent.get_cost());
//! ```

pub mod error;
pub mod time_limiter;
pub mod recorder;
pub mod instance;
pub mod tour;
pub mod local_search;
pub mod construction;
pub mod incumbent;
pub mod strategy;
pub mod heuristics;
pub mod exact;
pub mod tsplib;
pub mod config;
pub mod benchmark;

pub use error::TspError;
pub use instance::Instance;
pub use incumbent::Incumbent;
