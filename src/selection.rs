//! Current pattern and color choice

use crate::life::{PatternLibrary, PatternTemplate, Rgba};
use rand::Rng;

/// Cursor into the pattern library and the color palette
pub struct Selection {
    library: PatternLibrary,
    palette: Vec<Rgba>,
    pattern_index: usize,
    color_index: usize,
}

impl Selection {
    pub fn new(library: PatternLibrary, palette: Vec<Rgba>) -> Self {
        Self {
            library,
            palette,
            pattern_index: 0,
            color_index: 0,
        }
    }

    pub fn pattern(&self) -> Option<&PatternTemplate> {
        self.library.get(self.pattern_index)
    }

    pub fn pattern_name(&self) -> &str {
        self.pattern().map_or("(no pattern)", |p| p.name())
    }

    /// Selected color, white if the palette is empty
    pub fn color(&self) -> Rgba {
        self.palette.get(self.color_index).copied().unwrap_or(Rgba::WHITE)
    }

    pub fn select_pattern(&mut self, name: &str) -> bool {
        match self.library.index_of(name) {
            Some(i) => {
                self.pattern_index = i;
                true
            }
            None => false,
        }
    }

    pub fn next_pattern(&mut self) {
        self.pattern_index = wrap_index(self.pattern_index as i64 + 1, self.library.len());
    }

    pub fn prev_pattern(&mut self) {
        self.pattern_index = wrap_index(self.pattern_index as i64 - 1, self.library.len());
    }

    pub fn next_color(&mut self) {
        self.color_index = wrap_index(self.color_index as i64 + 1, self.palette.len());
    }

    pub fn prev_color(&mut self) {
        self.color_index = wrap_index(self.color_index as i64 - 1, self.palette.len());
    }

    pub fn random_pattern<R: Rng>(&mut self, rng: &mut R) {
        if !self.library.is_empty() {
            self.pattern_index = rng.gen_range(0..self.library.len());
        }
    }

    pub fn random_color<R: Rng>(&mut self, rng: &mut R) {
        if !self.palette.is_empty() {
            self.color_index = rng.gen_range(0..self.palette.len());
        }
    }
}

fn wrap_index(v: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    v.rem_euclid(len as i64) as usize
}
