//! Simulation session: the living grid plus everything that counts ticks

use crate::error::LifeError;
use crate::life::{stamp, step, Bounds, Cell, CycleDetector, GridState, PatternTemplate, Rgba};
use log::{debug, info};

/// Owns the grid between ticks. Display code only gets shared references.
pub struct Simulation {
    grid: GridState,
    generation: u64,
    wrap: bool,
    detector: CycleDetector,
    cycle_at: Option<u64>,
    fallback: Rgba,
}

impl Simulation {
    pub fn new(wrap: bool, fallback: Rgba) -> Self {
        Self {
            grid: GridState::new(),
            generation: 0,
            wrap,
            detector: CycleDetector::new(),
            cycle_at: None,
            fallback,
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alive_count(&self) -> usize {
        self.grid.count()
    }

    pub fn wrap_enabled(&self) -> bool {
        self.wrap
    }

    pub fn toggle_wrap(&mut self) -> bool {
        self.wrap = !self.wrap;
        self.wrap
    }

    /// Generation at which a repeated configuration was first seen this run
    pub fn cycle_at(&self) -> Option<u64> {
        self.cycle_at
    }

    /// Advance one generation over `bounds`. Returns true when the new
    /// configuration has been seen before.
    pub fn tick(&mut self, bounds: Bounds) -> Result<bool, LifeError> {
        let was_alive = !self.grid.is_empty();
        self.grid = step(&self.grid, bounds, self.wrap, self.fallback)?;
        self.generation += 1;
        if was_alive && self.grid.is_empty() {
            info!("population died out at generation {}", self.generation);
        }

        let repeated = self.detector.observe(&self.grid);
        if repeated && self.cycle_at.is_none() {
            info!("configuration repeats at generation {} ({} cells)", self.generation, self.grid.count());
            self.cycle_at = Some(self.generation);
        }
        debug!(
            "generation {}: {} alive, {} distinct states",
            self.generation,
            self.grid.count(),
            self.detector.len()
        );
        Ok(repeated)
    }

    /// Stamp `template` at `anchor`, shifted by the template center when
    /// `centered` is set.
    pub fn stamp(
        &mut self,
        template: Option<&PatternTemplate>,
        anchor: Cell,
        color: Rgba,
        centered: bool,
    ) -> Result<usize, LifeError> {
        let origin = match template {
            Some(t) if centered => anchor - t.center(),
            _ => anchor,
        };
        stamp(&mut self.grid, template, origin, color)
    }

    /// Drop every cell and all history.
    pub fn reset(&mut self) {
        self.grid.clear_all();
        self.detector.reset();
        self.generation = 0;
        self.cycle_at = None;
    }

    /// Reset, then place a single pattern as generation 0.
    pub fn seed(
        &mut self,
        template: Option<&PatternTemplate>,
        anchor: Cell,
        color: Rgba,
        centered: bool,
    ) -> Result<usize, LifeError> {
        self.reset();
        let written = self.stamp(template, anchor, color, centered)?;
        self.detector.observe(&self.grid);
        if let Some(t) = template {
            info!("seeded '{}' at ({}, {})", t.name(), anchor.x, anchor.y);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::PatternLibrary;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn bounds() -> Bounds {
        Bounds::new(-10, -10, 21, 21)
    }

    #[test]
    fn blinker_cycle_is_detected_at_generation_two() {
        let lib = PatternLibrary::builtin();
        let mut sim = Simulation::new(false, Rgba::WHITE);
        sim.seed(lib.find("blinker").ok(), Cell::new(0, 0), RED, false).unwrap();

        assert!(!sim.tick(bounds()).unwrap());
        assert_eq!(sim.cycle_at(), None);
        assert!(sim.tick(bounds()).unwrap());
        assert_eq!(sim.generation(), 2);
        assert_eq!(sim.cycle_at(), Some(2));
        assert!(sim.tick(bounds()).unwrap());
        assert_eq!(sim.cycle_at(), Some(2));
    }

    #[test]
    fn centered_stamp_subtracts_template_center() {
        let lib = PatternLibrary::builtin();
        let mut sim = Simulation::new(false, Rgba::WHITE);
        sim.stamp(lib.find("block").ok(), Cell::new(5, 5), RED, true).unwrap();
        // block center is (0,0): (0+1)/2 truncates
        assert!(sim.grid().is_alive(Cell::new(5, 5)));

        sim.reset();
        sim.stamp(lib.find("glider").ok(), Cell::new(5, 5), RED, true).unwrap();
        assert_eq!(sim.alive_count(), 5);
        assert!(sim.grid().is_alive(Cell::new(5, 4)));
        assert!(sim.grid().is_alive(Cell::new(6, 6)));
    }

    #[test]
    fn failed_tick_keeps_state() {
        let lib = PatternLibrary::builtin();
        let mut sim = Simulation::new(false, Rgba::WHITE);
        sim.seed(lib.find("blinker").ok(), Cell::new(0, 0), RED, false).unwrap();
        let before = sim.grid().clone();
        assert!(sim.tick(Bounds::new(0, 0, -3, 4)).is_err());
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn reset_clears_grid_and_history() {
        let lib = PatternLibrary::builtin();
        let mut sim = Simulation::new(true, Rgba::WHITE);
        sim.seed(lib.find("block").ok(), Cell::new(0, 0), RED, false).unwrap();
        assert!(sim.tick(bounds()).unwrap());
        sim.reset();
        assert_eq!(sim.alive_count(), 0);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.cycle_at(), None);
        assert!(sim.wrap_enabled());
        assert!(!sim.toggle_wrap());
    }

    #[test]
    fn seeding_an_empty_pattern_leaves_grid_empty() {
        let mut sim = Simulation::new(false, Rgba::WHITE);
        let empty = PatternTemplate::new("void", vec![]);
        let err = sim.seed(Some(&empty), Cell::new(0, 0), RED, true).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(sim.alive_count(), 0);
    }
}
