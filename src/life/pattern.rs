//! Stampable shapes and the built-in pattern library

use super::grid::{Cell, GridState, Rgba};
use crate::error::LifeError;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Named list of cell offsets. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    name: String,
    cells: Vec<Cell>,
}

impl PatternTemplate {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self { name: name.into(), cells }
    }

    fn from_offsets(name: &str, offsets: &[(i32, i32)]) -> Self {
        Self::new(name, offsets.iter().map(|&c| Cell::from(c)).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inclusive (min, max) corners of the offsets
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let first = *self.cells.first()?;
        Some(self.cells.iter().fold((first, first), |(lo, hi), c| {
            (Cell::new(lo.x.min(c.x), lo.y.min(c.y)), Cell::new(hi.x.max(c.x), hi.y.max(c.y)))
        }))
    }

    /// Integer midpoint of the bounding box; origin for an empty template.
    pub fn center(&self) -> Cell {
        match self.bounding_box() {
            Some((lo, hi)) => Cell::new((lo.x + hi.x) / 2, (lo.y + hi.y) / 2),
            None => Cell::default(),
        }
    }

    /// Width and height of the bounding box in cells
    pub fn size(&self) -> (i32, i32) {
        match self.bounding_box() {
            Some((lo, hi)) => (hi.x - lo.x + 1, hi.y - lo.y + 1),
            None => (0, 0),
        }
    }
}

/// Write `template` into `grid` at `origin` in `color`.
///
/// Purely additive: cells not covered by the template are left alone. A missing
/// or empty template leaves the grid untouched and is reported as a warning.
/// Returns the number of offsets written.
pub fn stamp(
    grid: &mut GridState,
    template: Option<&PatternTemplate>,
    origin: Cell,
    color: Rgba,
) -> Result<usize, LifeError> {
    let template = template.ok_or_else(|| {
        warn!("stamp skipped: no pattern selected");
        LifeError::MissingTemplate
    })?;
    if template.is_empty() {
        warn!("stamp skipped: pattern '{}' has no cells", template.name);
        return Err(LifeError::EmptyPattern { name: template.name.clone() });
    }
    for &offset in &template.cells {
        grid.set(origin + offset, color);
    }
    Ok(template.cells.len())
}

/// On-disk pattern definition (settings file or pattern file)
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDef {
    pub name: String,
    #[serde(default)]
    pub cells: Vec<[i32; 2]>,
}

impl From<PatternDef> for PatternTemplate {
    fn from(def: PatternDef) -> Self {
        PatternTemplate::new(def.name, def.cells.into_iter().map(|[x, y]| Cell::new(x, y)).collect())
    }
}

#[derive(Deserialize)]
struct PatternFile {
    #[serde(default)]
    patterns: Vec<PatternDef>,
}

/// Ordered set of templates addressed by index or (case-insensitive) name.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    templates: Vec<PatternTemplate>,
}

impl PatternLibrary {
    pub fn builtin() -> Self {
        Self::from_templates(builtin_patterns())
    }

    pub fn from_templates(templates: Vec<PatternTemplate>) -> Self {
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PatternTemplate> {
        self.templates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternTemplate> {
        self.templates.iter()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn find(&self, name: &str) -> Result<&PatternTemplate, LifeError> {
        self.index_of(name)
            .map(|i| &self.templates[i])
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
    }

    /// Add a template, replacing any existing one with the same name.
    pub fn insert(&mut self, template: PatternTemplate) {
        match self.index_of(&template.name) {
            Some(i) => self.templates[i] = template,
            None => self.templates.push(template),
        }
    }

    pub fn extend(&mut self, defs: impl IntoIterator<Item = PatternDef>) {
        for def in defs {
            self.insert(def.into());
        }
    }

    /// Merge patterns from a `.json` or `.toml` file holding a `patterns` list.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LifeError> {
        let content = fs::read_to_string(path)?;
        let file: PatternFile = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        let count = file.patterns.len();
        self.extend(file.patterns);
        Ok(count)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

// Offsets use screen orientation: y grows downward.
fn builtin_patterns() -> Vec<PatternTemplate> {
    vec![
        PatternTemplate::from_offsets("glider", &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
        PatternTemplate::from_offsets("blinker", &[(0, 0), (1, 0), (2, 0)]),
        PatternTemplate::from_offsets("block", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
        PatternTemplate::from_offsets("toad", &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)]),
        PatternTemplate::from_offsets(
            "beacon",
            &[(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)],
        ),
        PatternTemplate::from_offsets(
            "lwss",
            &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
        ),
        PatternTemplate::from_offsets("r-pentomino", &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]),
        PatternTemplate::from_offsets(
            "diehard",
            &[(6, 0), (0, 1), (1, 1), (1, 2), (5, 2), (6, 2), (7, 2)],
        ),
        PatternTemplate::from_offsets(
            "acorn",
            &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
        ),
        PatternTemplate::new("pulsar", pulsar()),
        PatternTemplate::from_offsets(
            "gosper-gun",
            &[
                (0, 4), (0, 5), (1, 4), (1, 5),
                (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8), (13, 2), (13, 8),
                (14, 5), (15, 3), (15, 7), (16, 4), (16, 5), (16, 6), (17, 5),
                (20, 2), (20, 3), (20, 4), (21, 2), (21, 3), (21, 4), (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),
                (34, 2), (34, 3), (35, 2), (35, 3),
            ],
        ),
    ]
}

/// Period-3 oscillator built from one quadrant mirrored four ways.
fn pulsar() -> Vec<Cell> {
    let quadrant = [(2, 0), (3, 0), (4, 0), (0, 2), (0, 3), (0, 4), (5, 2), (5, 3), (5, 4), (2, 5), (3, 5), (4, 5)];
    let mut cells = Vec::with_capacity(48);
    for (qx, qy) in quadrant {
        for (mx, my) in [(false, false), (true, false), (false, true), (true, true)] {
            let x = if mx { 12 - qx } else { qx };
            let y = if my { 12 - qy } else { qy };
            cells.push(Cell::new(x, y));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::engine::step;
    use crate::life::grid::Bounds;

    const RED: Rgba = Rgba::rgb(200, 0, 0);

    #[test]
    fn center_is_midpoint_of_bounding_box() {
        let glider = PatternLibrary::builtin().find("glider").unwrap().clone();
        assert_eq!(glider.bounding_box(), Some((Cell::new(0, 0), Cell::new(2, 2))));
        assert_eq!(glider.center(), Cell::new(1, 1));
        let odd = PatternTemplate::from_offsets("odd", &[(-3, 0), (0, 4)]);
        assert_eq!(odd.center(), Cell::new(-1, 2));
        assert_eq!(PatternTemplate::new("none", vec![]).center(), Cell::default());
    }

    #[test]
    fn stamp_writes_every_offset() {
        let mut grid = GridState::new();
        let blinker = PatternLibrary::builtin().find("blinker").unwrap().clone();
        let written = stamp(&mut grid, Some(&blinker), Cell::new(10, -4), RED).unwrap();
        assert_eq!(written, 3);
        assert_eq!(grid.cells_sorted(), vec![Cell::new(10, -4), Cell::new(11, -4), Cell::new(12, -4)]);
        assert_eq!(grid.get(Cell::new(11, -4)), Some(RED));
    }

    #[test]
    fn empty_template_is_a_reported_no_op() {
        let mut grid = GridState::new();
        grid.set(Cell::new(0, 0), RED);
        let before = grid.clone();
        let empty = PatternTemplate::new("nothing", vec![]);
        let err = stamp(&mut grid, Some(&empty), Cell::new(0, 0), RED).unwrap_err();
        assert!(matches!(err, LifeError::EmptyPattern { ref name } if name == "nothing"));
        assert_eq!(grid, before);
    }

    #[test]
    fn missing_template_is_a_reported_no_op() {
        let mut grid = GridState::new();
        let err = stamp(&mut grid, None, Cell::new(0, 0), RED).unwrap_err();
        assert!(matches!(err, LifeError::MissingTemplate));
        assert!(grid.is_empty());
    }

    #[test]
    fn stamp_never_removes_existing_cells() {
        let mut grid = GridState::new();
        let existing = [Cell::new(-5, -5), Cell::new(1, 0), Cell::new(40, 2)];
        for &c in &existing {
            grid.set(c, Rgba::WHITE);
        }
        let block = PatternLibrary::builtin().find("block").unwrap().clone();
        stamp(&mut grid, Some(&block), Cell::new(0, 0), RED).unwrap();
        for c in existing {
            assert!(grid.is_alive(c));
        }
        assert_eq!(grid.get(Cell::new(1, 0)), Some(RED));
        assert_eq!(grid.count(), 6);
    }

    #[test]
    fn builtin_names_are_unique_and_non_empty() {
        let lib = PatternLibrary::builtin();
        for (i, t) in lib.iter().enumerate() {
            assert!(!t.is_empty(), "{} is empty", t.name());
            assert_eq!(lib.index_of(t.name()), Some(i));
        }
        assert_eq!(lib.find("pulsar").unwrap().cells().len(), 48);
        assert!(matches!(lib.find("nope"), Err(LifeError::UnknownPattern(_))));
        assert_eq!(lib.index_of("GLIDER"), Some(0));
    }

    #[test]
    fn pulsar_has_period_three() {
        let lib = PatternLibrary::builtin();
        let mut grid = GridState::new();
        stamp(&mut grid, lib.find("pulsar").ok(), Cell::new(0, 0), RED).unwrap();
        let start = grid.cells_sorted();
        let bounds = Bounds::new(-5, -5, 23, 23);
        for _ in 0..3 {
            grid = step(&grid, bounds, false, Rgba::WHITE).unwrap();
        }
        assert_eq!(grid.cells_sorted(), start);
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut lib = PatternLibrary::builtin();
        let count = lib.len();
        lib.extend(vec![
            PatternDef { name: "Blinker".into(), cells: vec![[0, 0], [0, 1], [0, 2]] },
            PatternDef { name: "dot".into(), cells: vec![[0, 0]] },
        ]);
        assert_eq!(lib.len(), count + 1);
        assert_eq!(lib.find("blinker").unwrap().cells()[1], Cell::new(0, 1));
        assert_eq!(lib.find("dot").unwrap().size(), (1, 1));
    }

    #[test]
    fn load_file_reads_json_and_toml() {
        let dir = std::env::temp_dir().join(format!("lifegrid-patterns-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let json = dir.join("extra.json");
        fs::write(&json, r#"{"patterns":[{"name":"pair","cells":[[0,0],[1,0]]}]}"#).unwrap();
        let toml_path = dir.join("extra.toml");
        fs::write(&toml_path, "[[patterns]]\nname = \"diag\"\ncells = [[0, 0], [1, 1]]\n").unwrap();

        let mut lib = PatternLibrary::builtin();
        assert_eq!(lib.load_file(&json).unwrap(), 1);
        assert_eq!(lib.load_file(&toml_path).unwrap(), 1);
        assert_eq!(lib.find("pair").unwrap().cells().len(), 2);
        assert_eq!(lib.find("diag").unwrap().cells()[1], Cell::new(1, 1));

        fs::write(&json, "{not json").unwrap();
        assert!(matches!(lib.load_file(&json), Err(LifeError::Json(_))));

        fs::remove_dir_all(&dir).ok();
    }
}
