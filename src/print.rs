//! Headless mode: run a fixed number of generations and print the result

use crate::colors::DEFAULT_PALETTE;
use crate::error::LifeError;
use crate::life::{Bounds, GridState, PatternLibrary, Rgba};
use crate::sim::Simulation;

pub struct PrintConfig {
    pub pattern: String,
    pub generations: u64,
    pub width: i32,
    pub height: i32,
    pub wrap: bool,
}

/// Seed `pattern` in the middle of a `width` x `height` region, advance it and
/// describe the final state.
pub fn run(library: &PatternLibrary, config: &PrintConfig) -> Result<String, LifeError> {
    let bounds = Bounds::new(-(config.width / 2), -(config.height / 2), config.width, config.height);
    bounds.validate()?;

    let template = library.find(&config.pattern)?;
    let mut sim = Simulation::new(config.wrap, Rgba::WHITE);
    sim.seed(Some(template), bounds.center(), DEFAULT_PALETTE[0], true)?;
    for _ in 0..config.generations {
        sim.tick(bounds)?;
    }

    let mut out = render_text(sim.grid(), bounds);
    out.push_str(&format!(
        "pattern {}, generation {}, alive {}, wrap {}, cycle {}\n",
        template.name(),
        sim.generation(),
        sim.alive_count(),
        if sim.wrap_enabled() { "on" } else { "off" },
        sim.cycle_at().map_or_else(|| "none".to_string(), |g| format!("at {g}")),
    ));
    Ok(out)
}

/// `#` for living cells, `.` for dead ones, one line per row.
pub fn render_text(grid: &GridState, bounds: Bounds) -> String {
    let mut out = String::with_capacity(bounds.area() + bounds.height.max(0) as usize);
    for y in bounds.min_y..bounds.max_y() {
        for x in bounds.min_x..bounds.max_x() {
            out.push(if grid.is_alive((x, y).into()) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
