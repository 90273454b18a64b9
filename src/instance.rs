//! Geometry & Cost: node coordinates and the precomputed Euclidean cost matrix.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::TspError;

/// A 2D point. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(x: f64, y: f64) -> Self {
        Node { x, y }
    }
}

/// A symmetric Euclidean TSP instance: node coordinates plus the dense
/// `n * n` cost matrix derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub n: usize,
    pub nodes: Vec<Node>,
    /// Row-major `n * n` matrix; `costs[i * n + j] == costs[j * n + i]`.
    pub costs: Vec<f64>,
}

impl Instance {
    /// Build an instance from explicit node coordinates.
    pub fn from_nodes(name: impl Into<String>, nodes: Vec<Node>) -> Result<Self, TspError> {
        if nodes.is_empty() {
            return Err(TspError::Allocation("instance must have at least one node".into()));
        }
        let n = nodes.len();
        let costs = Self::compute_cost_matrix(&nodes);
        Ok(Instance { name: name.into(), n, nodes, costs })
    }

    /// Generate a random instance of `n` nodes uniformly inside
    /// `[x0, x0+side] x [y0, y0+side]`, seeded for reproducibility.
    pub fn random(n: usize, x0: f64, y0: f64, side: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let nodes: Vec<Node> = (0..n.max(1))
            .map(|_| Node::new(x0 + rng.gen::<f64>() * side, y0 + rng.gen::<f64>() * side))
            .collect();
        let costs = Self::compute_cost_matrix(&nodes);
        Instance { name: format!("random-{n}"), n: nodes.len(), nodes, costs }
    }

    fn compute_cost_matrix(nodes: &[Node]) -> Vec<f64> {
        let n = nodes.len();
        let mut costs = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = nodes[i].x - nodes[j].x;
                let dy = nodes[i].y - nodes[j].y;
                let d = (dx * dx + dy * dy).sqrt();
                costs[i * n + j] = d;
                costs[j * n + i] = d;
            }
        }
        costs
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.costs[i * self.n + j]
    }

    /// Parse a TSPLIB-style file (`NAME`, `DIMENSION`, `NODE_COORD_SECTION`
    /// with `EUC_2D` edge weights). Demand/capacity/display sections found in
    /// richer TSPLIB dialects are ignored, matching this crate's plain-TSP
    /// scope.
    pub fn from_tsplib_file<P: AsRef<Path>>(path: P) -> Result<Self, TspError> {
        let file = File::open(&path).map_err(|e| TspError::InstanceLoad(e.to_string()))?;
        let reader = BufReader::new(file);

        let mut name = String::new();
        let mut dimension = 0usize;
        let mut coords: Vec<(usize, f64, f64)> = Vec::new();
        let mut in_coords = false;

        for line in reader.lines() {
            let line = line.map_err(|e| TspError::InstanceLoad(e.to_string()))?;
            let line = line.trim();
            if line.is_empty() || line == "EOF" {
                continue;
            }
            if line.starts_with("NAME") {
                name = line.splitn(2, ':').nth(1).unwrap_or("").trim().to_string();
                continue;
            }
            if line.starts_with("DIMENSION") {
                let v = line.splitn(2, ':').nth(1).unwrap_or("").trim();
                dimension = v
                    .parse()
                    .map_err(|_| TspError::InstanceLoad(format!("invalid DIMENSION: {v}")))?;
                continue;
            }
            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
                continue;
            }
            if line.starts_with(|c: char| c.is_ascii_uppercase()) && line.contains(':') {
                // Any other "KEY: value" header line (COMMENT, EDGE_WEIGHT_TYPE...).
                in_coords = false;
                continue;
            }
            if in_coords {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 3 {
                    let id: usize = parts[0]
                        .parse()
                        .map_err(|_| TspError::InstanceLoad("invalid node id".into()))?;
                    let x: f64 = parts[1]
                        .parse()
                        .map_err(|_| TspError::InstanceLoad("invalid x coordinate".into()))?;
                    let y: f64 = parts[2]
                        .parse()
                        .map_err(|_| TspError::InstanceLoad("invalid y coordinate".into()))?;
                    coords.push((id, x, y));
                }
            }
        }

        if coords.is_empty() {
            return Err(TspError::InstanceLoad("no NODE_COORD_SECTION found".into()));
        }
        coords.sort_by_key(|(id, _, _)| *id);
        if dimension == 0 {
            dimension = coords.len();
        }
        let nodes: Vec<Node> = coords
            .into_iter()
            .take(dimension)
            .map(|(_, x, y)| Node::new(x, y))
            .collect();

        Instance::from_nodes(if name.is_empty() { "instance".to_string() } else { name }, nodes)
            .map_err(|e| TspError::InstanceLoad(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_diagonal() {
        let nodes = vec![Node::new(0.0, 0.0), Node::new(3.0, 4.0)];
        let inst = Instance::from_nodes("t", nodes).unwrap();
        assert!((inst.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((inst.distance(1, 0) - 5.0).abs() < 1e-10);
        assert_eq!(inst.distance(0, 0), 0.0);
    }

    #[test]
    fn random_instance_is_deterministic_given_seed() {
        let a = Instance::random(50, 0.0, 0.0, 100.0, 7);
        let b = Instance::random(50, 0.0, 0.0, 100.0, 7);
        assert_eq!(a.costs, b.costs);
    }

    #[test]
    fn empty_node_list_is_rejected() {
        assert!(Instance::from_nodes("empty", Vec::new()).is_err());
    }
}
