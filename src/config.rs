use crate::colors::{parse_hex, DEFAULT_PALETTE};
use crate::error::LifeError;
use crate::input::{Keymap, DEFAULT_INPUT_TIMEOUT};
use crate::life::{Cell, Rgba};
use crate::settings::Settings;
use std::time::Duration;

/// Shortest accepted generation interval
const MIN_INTERVAL: f32 = 0.01;

/// Runtime configuration for an interactive session, merged from the settings
/// file and command-line flags.
#[derive(Clone)]
pub struct SimConfig {
    pub interval: Duration,
    pub input_timeout: Duration,
    pub wrap: bool,
    pub cell_centered: bool,
    pub genesis: Cell,
    pub pattern: Option<String>,
    pub fallback: Rgba,
    pub palette: Vec<Rgba>,
    pub seed: Option<u64>,
    pub draw_char: char,
    pub keymap: Keymap,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            input_timeout: DEFAULT_INPUT_TIMEOUT,
            wrap: false,
            cell_centered: true,
            genesis: Cell::default(),
            pattern: None,
            fallback: Rgba::WHITE,
            palette: DEFAULT_PALETTE.to_vec(),
            seed: None,
            draw_char: '█',
            keymap: Keymap::default(),
        }
    }
}

impl SimConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self, LifeError> {
        let mut config = Self::default();
        let sim = &settings.sim;

        if let Some(secs) = sim.interval {
            config.interval = interval_from_secs(secs)?;
        }
        if let Some(secs) = sim.input_timeout {
            config.input_timeout = secs_to_duration(secs.max(0.0))?;
        }
        if let Some(wrap) = sim.wrap {
            config.wrap = wrap;
        }
        if let Some(centered) = sim.cell_centered {
            config.cell_centered = centered;
        }
        if let Some([x, y]) = sim.genesis {
            config.genesis = Cell::new(x, y);
        }
        if let Some(c) = sim.draw_char {
            config.draw_char = c;
        }
        if let Some(hex) = &sim.fallback_color {
            config.fallback = parse_hex(hex)?;
        }
        config.pattern = sim.pattern.clone();

        if !settings.palette.colors.is_empty() {
            config.palette = settings
                .palette
                .colors
                .iter()
                .map(|c| parse_hex(c))
                .collect::<Result<_, _>>()?;
        }
        config.keymap = Keymap::with_overrides(&settings.keys)?;
        Ok(config)
    }
}

pub fn interval_from_secs(secs: f32) -> Result<Duration, LifeError> {
    secs_to_duration(secs.max(MIN_INTERVAL))
}

fn secs_to_duration(secs: f32) -> Result<Duration, LifeError> {
    Duration::try_from_secs_f32(secs).map_err(|_| LifeError::InvalidDuration(secs))
}
