//! Generation step for the B3/S23 rule over a bounded region

use super::grid::{Bounds, Cell, GridState, Rgba};
use crate::error::LifeError;

/// Neighbor offsets in scan order: dx ascending, then dy ascending.
/// Newborn cells inherit the color of the first live neighbor in this order.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

/// Compute the next generation of `current` inside `bounds`.
///
/// `current` is only read; the result is a fresh grid holding nothing outside
/// `bounds`. With `wrap` set, neighbors past an edge are read from the opposite
/// edge; otherwise they count as dead. `fallback` colors a newborn cell when no
/// live neighbor can be found for it.
pub fn step(current: &GridState, bounds: Bounds, wrap: bool, fallback: Rgba) -> Result<GridState, LifeError> {
    bounds.validate()?;

    let mut next = GridState::with_capacity(current.count());
    for cell in bounds.cells() {
        let (neighbors, first_color) = scan_neighbors(current, cell, bounds, wrap);
        match (current.get(cell), neighbors) {
            (Some(color), 2) | (Some(color), 3) => next.set(cell, color),
            (None, 3) => next.set(cell, first_color.unwrap_or(fallback)),
            _ => {}
        }
    }
    Ok(next)
}

/// Count live neighbors and remember the color of the first one found.
fn scan_neighbors(grid: &GridState, cell: Cell, bounds: Bounds, wrap: bool) -> (u8, Option<Rgba>) {
    let mut count = 0u8;
    let mut first = None;
    for (dx, dy) in NEIGHBORS {
        let mut neighbor = Cell::new(cell.x + dx, cell.y + dy);
        if !bounds.contains(neighbor) {
            if !wrap {
                continue;
            }
            neighbor = bounds.wrap(neighbor);
        }
        if let Some(color) = grid.get(neighbor) {
            count += 1;
            first.get_or_insert(color);
        }
    }
    (count, first)
}
