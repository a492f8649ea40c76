//! Simulation core
//!
//! Sparse grid, generation step, pattern stamping and cycle detection. Nothing
//! in here touches the terminal.

pub mod cycle;
pub mod engine;
pub mod grid;
pub mod pattern;

pub use cycle::CycleDetector;
pub use engine::step;
pub use grid::{Bounds, Cell, GridState, Rgba};
pub use pattern::{stamp, PatternDef, PatternLibrary, PatternTemplate};
