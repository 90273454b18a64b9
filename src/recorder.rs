//! Cost Recorder: an optional trace of incumbent cost over time.
//!
//! Grounded in the original C `CostRecorder` (manual capacity doubling on a
//! growable array). `Vec` already amortizes growth geometrically, so the
//! Rust version is a thin `enabled`-gated wrapper rather than a reimplemented
//! growth strategy.

const DEFAULT_CAPACITY: usize = 1024;

/// Records the cost of each improving (or otherwise notable) move a strategy
/// makes, for later analysis or plotting. Disabled recorders are zero-cost
/// no-ops on the hot path.
#[derive(Debug, Clone)]
pub struct CostRecorder {
    costs: Vec<f64>,
    enabled: bool,
}

impl CostRecorder {
    pub fn new() -> Self {
        CostRecorder {
            costs: Vec::with_capacity(DEFAULT_CAPACITY),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        CostRecorder {
            costs: Vec::new(),
            enabled: false,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn add(&mut self, cost: f64) {
        if self.enabled {
            self.costs.push(cost);
        }
    }

    pub fn count(&self) -> usize {
        self.costs.len()
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Append another recorder's trace onto this one, regardless of either's
    /// `enabled` flag (merging is an explicit operation, not gated).
    pub fn merge(&mut self, other: &CostRecorder) {
        self.costs.extend_from_slice(&other.costs);
    }
}

impl Default for CostRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_recorder_drops_adds() {
        let mut rec = CostRecorder::disabled();
        rec.add(1.0);
        rec.add(2.0);
        assert_eq!(rec.count(), 0);
    }

    #[test]
    fn enabled_recorder_keeps_order() {
        let mut rec = CostRecorder::new();
        rec.add(10.0);
        rec.add(9.5);
        assert_eq!(rec.costs(), &[10.0, 9.5]);
    }

    #[test]
    fn merge_appends_regardless_of_enabled_flag() {
        let mut rec = CostRecorder::disabled();
        let mut other = CostRecorder::new();
        other.add(3.0);
        rec.merge(&other);
        assert_eq!(rec.costs(), &[3.0]);
    }
}
