//! Sparse living surface: cell coordinates, colors and evaluation bounds.

use crate::error::LifeError;
use std::collections::HashMap;
use std::ops::{Add, Sub};

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

/// RGBA color attached to a living cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha forced to fully opaque
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }
}

/// Axis-aligned evaluation region. `max_x`/`max_y` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(min_x: i32, min_y: i32, width: i32, height: i32) -> Self {
        Self { min_x, min_y, width, height }
    }

    /// Build from inclusive corners, rejecting `max < min` on either axis.
    #[allow(dead_code)]
    pub fn from_corners(min: Cell, max: Cell) -> Result<Self, LifeError> {
        let bounds = Self::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1);
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), LifeError> {
        if self.width < 0 || self.height < 0 {
            return Err(LifeError::InvalidBounds { width: self.width, height: self.height });
        }
        Ok(())
    }

    pub fn max_x(&self) -> i32 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> i32 {
        self.min_y + self.height
    }

    pub fn area(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min_x && cell.x < self.max_x() && cell.y >= self.min_y && cell.y < self.max_y()
    }

    /// Integer midpoint of the region
    pub fn center(&self) -> Cell {
        Cell::new(self.min_x + self.width / 2, self.min_y + self.height / 2)
    }

    /// Toroidal remap of a coordinate lying at most one step outside the region.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(
            wrap_axis(cell.x, self.min_x, self.max_x()),
            wrap_axis(cell.y, self.min_y, self.max_y()),
        )
    }

    /// Every cell of the region, x ascending then y ascending.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (min_y, max_y) = (self.min_y, self.max_y());
        (self.min_x..self.max_x()).flat_map(move |x| (min_y..max_y).map(move |y| Cell::new(x, y)))
    }
}

fn wrap_axis(v: i32, min: i32, max: i32) -> i32 {
    if v < min {
        max - 1
    } else if v >= max {
        min
    } else {
        v
    }
}

/// Mapping from coordinate to color. A present key is a living cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    cells: HashMap<Cell, Rgba>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { cells: HashMap::with_capacity(capacity) }
    }

    pub fn get(&self, cell: Cell) -> Option<Rgba> {
        self.cells.get(&cell).copied()
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Mark a cell alive. Alpha is normalized to opaque.
    pub fn set(&mut self, cell: Cell, color: Rgba) {
        self.cells.insert(cell, color.opaque());
    }

    #[allow(dead_code)]
    pub fn clear(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    pub fn clear_all(&mut self) {
        self.cells.clear();
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Rgba)> + '_ {
        self.cells.iter().map(|(&cell, &color)| (cell, color))
    }

    /// Alive coordinates in ascending order
    pub fn cells_sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.keys().copied().collect();
        cells.sort_unstable();
        cells
    }
}

impl FromIterator<(Cell, Rgba)> for GridState {
    fn from_iter<I: IntoIterator<Item = (Cell, Rgba)>>(iter: I) -> Self {
        let mut grid = GridState::new();
        for (cell, color) in iter {
            grid.set(cell, color);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_are_dead_everywhere() {
        let mut grid = GridState::new();
        grid.set(Cell::new(0, 0), Rgba::WHITE);
        assert!(grid.get(Cell::new(1, 0)).is_none());
        assert!(grid.get(Cell::new(i32::MAX, i32::MIN)).is_none());
        assert!(!grid.is_alive(Cell::new(-1_000_000, 5)));
    }

    #[test]
    fn set_forces_opaque_alpha() {
        let mut grid = GridState::new();
        grid.set(Cell::new(2, 3), Rgba { r: 10, g: 20, b: 30, a: 7 });
        assert_eq!(grid.get(Cell::new(2, 3)), Some(Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn clear_and_count() {
        let mut grid = GridState::new();
        grid.set(Cell::new(0, 0), Rgba::WHITE);
        grid.set(Cell::new(0, 1), Rgba::WHITE);
        grid.set(Cell::new(0, 1), Rgba::rgb(1, 2, 3));
        assert_eq!(grid.count(), 2);
        grid.clear(Cell::new(0, 0));
        assert_eq!(grid.count(), 1);
        grid.clear(Cell::new(9, 9));
        assert_eq!(grid.count(), 1);
        grid.clear_all();
        assert!(grid.is_empty());
    }

    #[test]
    fn bounds_from_corners_is_inclusive() {
        let bounds = Bounds::from_corners(Cell::new(-2, 1), Cell::new(2, 1)).unwrap();
        assert_eq!(bounds, Bounds::new(-2, 1, 5, 1));
        assert_eq!(bounds.max_x(), 3);
        assert!(bounds.contains(Cell::new(2, 1)));
        assert!(!bounds.contains(Cell::new(3, 1)));
    }

    #[test]
    fn inverted_corners_are_rejected() {
        let err = Bounds::from_corners(Cell::new(5, 0), Cell::new(3, 0)).unwrap_err();
        assert!(matches!(err, LifeError::InvalidBounds { width: -1, .. }));
    }

    #[test]
    fn wrap_maps_to_opposite_edge() {
        let bounds = Bounds::new(0, 0, 10, 5);
        assert_eq!(bounds.wrap(Cell::new(-1, 2)), Cell::new(9, 2));
        assert_eq!(bounds.wrap(Cell::new(10, 2)), Cell::new(0, 2));
        assert_eq!(bounds.wrap(Cell::new(-1, 5)), Cell::new(9, 0));
        assert_eq!(bounds.wrap(Cell::new(4, 4)), Cell::new(4, 4));
    }

    #[test]
    fn cells_enumerates_whole_region() {
        let bounds = Bounds::new(1, 1, 2, 3);
        let cells: Vec<Cell> = bounds.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(1, 1));
        assert_eq!(cells[1], Cell::new(1, 2));
        assert_eq!(cells[5], Cell::new(2, 3));
        assert_eq!(Bounds::new(0, 0, 0, 4).cells().count(), 0);
    }
}
