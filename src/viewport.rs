//! Terminal geometry to grid coordinates
//!
//! Each grid cell is drawn two columns wide so it looks roughly square.

use crate::life::{Bounds, Cell};
use rand::Rng;

pub const CELL_COLUMNS: u16 = 2;

/// Window onto the grid: top-left grid cell plus size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    origin: Cell,
    cols: i32,
    rows: i32,
}

impl Viewport {
    /// Viewport of a `width` x `height` character area centered on grid (0, 0).
    pub fn new(width: u16, height: u16) -> Self {
        let (cols, rows) = cells_for(width, height);
        Self {
            origin: Cell::new(-(cols / 2), -(rows / 2)),
            cols,
            rows,
        }
    }

    /// Resize, keeping the same grid cell in the middle.
    pub fn resize(&mut self, width: u16, height: u16) {
        let center = self.center();
        let (cols, rows) = cells_for(width, height);
        self.cols = cols;
        self.rows = rows;
        self.origin = Cell::new(center.x - cols / 2, center.y - rows / 2);
    }

    pub fn pan(&mut self, delta: Cell) {
        self.origin = self.origin + delta;
    }

    /// Region the engine evaluates this tick
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.origin.x, self.origin.y, self.cols, self.rows)
    }

    pub fn center(&self) -> Cell {
        self.bounds().center()
    }

    pub fn screen_to_cell(&self, column: u16, row: u16) -> Option<Cell> {
        let cell = self.origin + Cell::new((column / CELL_COLUMNS) as i32, row as i32);
        self.bounds().contains(cell).then_some(cell)
    }

    /// Leftmost terminal column and row of `cell`, if visible
    pub fn cell_to_screen(&self, cell: Cell) -> Option<(u16, u16)> {
        if !self.bounds().contains(cell) {
            return None;
        }
        let rel = cell - self.origin;
        Some((rel.x as u16 * CELL_COLUMNS, rel.y as u16))
    }

    /// Uniformly chosen visible cell; the center when nothing is visible.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        if self.cols <= 0 || self.rows <= 0 {
            return self.center();
        }
        self.origin + Cell::new(rng.gen_range(0..self.cols), rng.gen_range(0..self.rows))
    }
}

fn cells_for(width: u16, height: u16) -> (i32, i32) {
    ((width / CELL_COLUMNS) as i32, height as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_viewport_is_centered_on_origin() {
        let vp = Viewport::new(80, 24);
        assert_eq!(vp.bounds(), Bounds::new(-20, -12, 40, 24));
        assert_eq!(vp.center(), Cell::new(0, 0));
    }

    #[test]
    fn screen_and_grid_round_trip() {
        let vp = Viewport::new(40, 10);
        let cell = vp.screen_to_cell(7, 3).unwrap();
        assert_eq!(cell, Cell::new(-10 + 3, -5 + 3));
        assert_eq!(vp.cell_to_screen(cell), Some((6, 3)));
        assert_eq!(vp.screen_to_cell(40, 0), None);
        assert_eq!(vp.cell_to_screen(Cell::new(100, 0)), None);
    }

    #[test]
    fn pan_moves_bounds() {
        let mut vp = Viewport::new(20, 10);
        vp.pan(Cell::new(3, -2));
        assert_eq!(vp.bounds(), Bounds::new(-2, -7, 10, 10));
    }

    #[test]
    fn resize_keeps_center() {
        let mut vp = Viewport::new(20, 10);
        vp.pan(Cell::new(5, 5));
        let center = vp.center();
        vp.resize(60, 30);
        assert_eq!(vp.center(), center);
        assert_eq!(vp.bounds().width, 30);
    }

    #[test]
    fn random_cell_is_visible() {
        let vp = Viewport::new(30, 8);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(vp.bounds().contains(vp.random_cell(&mut rng)));
        }
        let empty = Viewport::new(1, 0);
        assert_eq!(empty.random_cell(&mut rng), empty.center());
    }
}
