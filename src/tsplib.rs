//! TSPLIB-adjacent file I/O: thin readers/writers described only at their
//! interface, per this crate's external-collaborator boundary.
//!
//! `.tspsol` round-trip format is a [SUPPLEMENT] grounded in
//! `original_source/.../parser/solution/tsp_parser_sol_v1.c`: a one-line
//! magic header, the tour, and the recorded cost, so a solution can be
//! reloaded and checked against [`crate::incumbent::check_feasibility`].

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::TspError;

const MAGIC: &str = "TSP_SOLUTION_V1";

/// Write `tour`/`cost` to `path` in the `.tspsol` format.
pub fn write_solution<P: AsRef<Path>>(path: P, tour: &[usize], cost: f64) -> Result<(), TspError> {
    let mut file = File::create(path)?;
    writeln!(file, "{MAGIC}")?;
    writeln!(file, "{}", tour.len())?;
    let tour_line: Vec<String> = tour.iter().map(|n| n.to_string()).collect();
    writeln!(file, "{}", tour_line.join(" "))?;
    writeln!(file, "{cost:.10}")?;
    Ok(())
}

/// Read a `.tspsol` file back into `(tour, cost)`.
pub fn read_solution<P: AsRef<Path>>(path: P) -> Result<(Vec<usize>, f64), TspError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let magic = lines
        .next()
        .ok_or_else(|| TspError::SolutionLoad("empty file".into()))??;
    if magic.trim() != MAGIC {
        return Err(TspError::SolutionLoad(format!("unexpected magic line: {magic}")));
    }

    let n_line = lines
        .next()
        .ok_or_else(|| TspError::SolutionLoad("missing tour length".into()))??;
    let n: usize = n_line
        .trim()
        .parse()
        .map_err(|_| TspError::SolutionLoad("invalid tour length".into()))?;

    let tour_line = lines
        .next()
        .ok_or_else(|| TspError::SolutionLoad("missing tour".into()))??;
    let tour: Vec<usize> = tour_line
        .split_whitespace()
        .map(|tok| tok.parse().map_err(|_| TspError::SolutionLoad(format!("invalid node id: {tok}"))))
        .collect::<Result<_, _>>()?;
    if tour.len() != n {
        return Err(TspError::SolutionLoad(format!(
            "declared length {n} does not match tour of length {}",
            tour.len()
        )));
    }

    let cost_line = lines
        .next()
        .ok_or_else(|| TspError::SolutionLoad("missing cost".into()))??;
    let cost: f64 = cost_line
        .trim()
        .parse()
        .map_err(|_| TspError::SolutionLoad("invalid cost".into()))?;

    Ok((tour, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn round_trip_preserves_tour_and_cost() {
        let path = temp_dir().join(format!("tsp_solver_test_{}.tspsol", std::process::id()));
        let tour = vec![0, 3, 1, 2];
        write_solution(&path, &tour, 42.5).unwrap();
        let (read_tour, read_cost) = read_solution(&path).unwrap();
        assert_eq!(read_tour, tour);
        assert!((read_cost - 42.5).abs() < 1e-9);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_files_missing_the_magic_header() {
        let path = temp_dir().join(format!("tsp_solver_bad_{}.tspsol", std::process::id()));
        std::fs::write(&path, "not a solution file\n").unwrap();
        assert!(read_solution(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
