//! Repeated-configuration detection

use super::grid::GridState;
use std::collections::HashSet;
use std::fmt::Write;

/// History of every alive-cell configuration observed during one run.
#[derive(Debug, Default)]
pub struct CycleDetector {
    seen: HashSet<String>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `grid`, returning true if the same coordinate set was seen before.
    /// Colors are ignored.
    pub fn observe(&mut self, grid: &GridState) -> bool {
        !self.seen.insert(signature(grid))
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }

    /// Number of distinct configurations recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

/// Canonical encoding: sorted coordinates as `x,y;x,y;...`
pub fn signature(grid: &GridState) -> String {
    let cells = grid.cells_sorted();
    let mut out = String::with_capacity(cells.len() * 8);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let _ = write!(out, "{},{}", cell.x, cell.y);
    }
    out
}
