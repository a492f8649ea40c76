//! Interactive session: input, scheduling and drawing around the simulation

use crate::colors::{dim, to_hex, to_term, StatusColor};
use crate::config::SimConfig;
use crate::error::LifeError;
use crate::help::{build_help, render_help_overlay};
use crate::input::{map_mouse, CommandInterpreter, InputEvent};
use crate::life::{Cell, PatternLibrary};
use crate::scheduler::Scheduler;
use crate::selection::Selection;
use crate::sim::Simulation;
use crate::terminal::Terminal;
use crate::viewport::{Viewport, CELL_COLUMNS};
use crossterm::event::{Event, KeyEventKind};
use crossterm::style::Color;
use log::{info, warn};
use rand::prelude::*;
use std::time::{Duration, Instant};

/// Delay between frames; input is polled once per frame
const FRAME_TIME: Duration = Duration::from_millis(30);

/// Rows reserved below the grid for the status line
const STATUS_ROWS: u16 = 1;

/// How long a status-line notice stays up
const NOTICE_TTL: Duration = Duration::from_secs(3);

pub struct App {
    config: SimConfig,
    sim: Simulation,
    scheduler: Scheduler,
    interpreter: CommandInterpreter,
    selection: Selection,
    viewport: Viewport,
    rng: StdRng,
    help_text: String,
    show_grid: bool,
    show_ui: bool,
    show_help: bool,
    placing: bool,
    cursor: Cell,
    notice: Option<(String, Instant)>,
    now: Instant,
}

impl App {
    pub fn new(config: SimConfig, library: PatternLibrary, (width, height): (u16, u16)) -> Self {
        let mut selection = Selection::new(library, config.palette.clone());
        if let Some(name) = &config.pattern {
            if !selection.select_pattern(name) {
                warn!("unknown pattern '{name}', using '{}'", selection.pattern_name());
            }
        }
        let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let viewport = Viewport::new(width, height.saturating_sub(STATUS_ROWS));

        Self {
            sim: Simulation::new(config.wrap, config.fallback),
            scheduler: Scheduler::new(config.interval),
            interpreter: CommandInterpreter::new(config.input_timeout),
            help_text: build_help(&config.keymap),
            cursor: viewport.center(),
            selection,
            viewport,
            rng,
            config,
            show_grid: false,
            show_ui: true,
            show_help: false,
            placing: false,
            notice: None,
            now: Instant::now(),
        }
    }

    /// Clear everything and place the selected pattern at the start position.
    pub fn seed(&mut self) {
        let anchor = if self.config.cell_centered {
            self.viewport.center()
        } else {
            self.config.genesis
        };
        let result = self.sim.seed(self.selection.pattern(), anchor, self.selection.color(), self.config.cell_centered);
        self.report(result);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height.saturating_sub(STATUS_ROWS));
    }

    /// Map raw terminal events to input events.
    pub fn translate(&self, events: &[Event]) -> Vec<InputEvent> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => self.config.keymap.map_key(key.code, key.modifiers),
                Event::Mouse(mouse) => map_mouse(*mouse),
                _ => None,
            })
            .collect()
    }

    /// One frame: poll input, act on triggers, tick if due. Returns false on quit.
    pub fn frame(&mut self, events: &[InputEvent], now: Instant, dt: Duration) -> Result<bool, LifeError> {
        self.now = now;
        if self.notice.as_ref().is_some_and(|(_, at)| now.saturating_duration_since(*at) >= NOTICE_TTL) {
            self.notice = None;
        }
        self.interpreter.poll(events, now);
        if !self.dispatch() {
            return Ok(false);
        }
        if self.scheduler.advance(dt) {
            self.tick()?;
        }
        Ok(true)
    }

    fn tick(&mut self) -> Result<(), LifeError> {
        let first_cycle = self.sim.cycle_at().is_none();
        if self.sim.tick(self.viewport.bounds())? && first_cycle {
            self.set_notice(format!("cycle detected at generation {}", self.sim.generation()));
        }
        Ok(())
    }

    /// Act on this frame's triggers, then clear them. Returns false on quit.
    fn dispatch(&mut self) -> bool {
        let t = *self.interpreter.triggers();
        self.interpreter.clear_triggers();

        if !t.any() {
            return true;
        }
        if t.quit {
            return false;
        }
        if t.toggle_grid {
            self.show_grid = !self.show_grid;
        }
        if t.toggle_ui {
            self.show_ui = !self.show_ui;
        }
        if t.help {
            self.show_help = !self.show_help;
        }
        if t.toggle_wrap {
            let on = self.sim.toggle_wrap();
            self.set_notice(format!("wraparound {}", if on { "on" } else { "off" }));
        }
        if t.pause {
            self.scheduler.toggle();
        }
        if t.pan != Cell::default() {
            self.viewport.pan(t.pan);
            self.cursor = self.cursor + t.pan;
        }
        if let Some(cell) = t.pointer.and_then(|(col, row)| self.viewport.screen_to_cell(col, row)) {
            self.cursor = cell;
        }
        if t.pattern_next {
            self.selection.next_pattern();
        }
        if t.pattern_prev {
            self.selection.prev_pattern();
        }
        if t.color_next {
            self.selection.next_color();
        }
        if t.color_prev {
            self.selection.prev_color();
        }
        if t.clear {
            self.sim.reset();
            info!("grid cleared");
        }
        if t.reseed {
            self.seed();
        }
        if t.toggle_placement {
            self.placing = !self.placing;
            if self.placing && !self.viewport.bounds().contains(self.cursor) {
                self.cursor = self.viewport.center();
            }
        }
        if t.placement_click && self.placing {
            self.place_at_cursor();
        }
        if t.placement_cancel {
            self.placing = false;
        }
        if t.spawn {
            self.spawn();
        }
        true
    }

    fn apply_modifiers(&mut self) {
        if self.interpreter.random_pattern() {
            self.selection.random_pattern(&mut self.rng);
        }
        if self.interpreter.random_color() {
            self.selection.random_color(&mut self.rng);
        }
    }

    fn place_at_cursor(&mut self) {
        self.apply_modifiers();
        let result = self.sim.stamp(self.selection.pattern(), self.cursor, self.selection.color(), true);
        self.report(result);
    }

    /// Stamp the selected pattern `repeat_count` times at random visible cells,
    /// then consume the buffered count and modifiers.
    fn spawn(&mut self) {
        let count = self.interpreter.repeat_count();
        for _ in 0..count {
            self.apply_modifiers();
            let at = self.viewport.random_cell(&mut self.rng);
            let result = self.sim.stamp(self.selection.pattern(), at, self.selection.color(), false);
            if !self.report(result) {
                break;
            }
        }
        info!("spawned {} x{}", self.selection.pattern_name(), count);
        self.interpreter.reset_buffer();
    }

    /// Surface a stamp failure in the status line. Returns true on success.
    fn report(&mut self, result: Result<usize, LifeError>) -> bool {
        match result {
            Ok(_) => true,
            Err(err) => {
                if !err.is_recoverable() {
                    warn!("{err}");
                }
                self.set_notice(err.to_string());
                false
            }
        }
    }

    fn set_notice(&mut self, text: String) {
        self.notice = Some((text, self.now));
    }

    fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn draw(&self, term: &mut Terminal) {
        term.clear();
        let bounds = self.viewport.bounds();
        let cell_str: String = std::iter::repeat(self.config.draw_char).take(CELL_COLUMNS as usize).collect();

        if self.show_grid {
            for cell in bounds.cells() {
                if let Some((x, y)) = self.viewport.cell_to_screen(cell) {
                    term.set(x as i32, y as i32, '·', Some(Color::DarkGrey), false);
                }
            }
        }

        for (cell, color) in self.sim.grid().iter() {
            if let Some((x, y)) = self.viewport.cell_to_screen(cell) {
                term.set_str(x as i32, y as i32, &cell_str, Some(to_term(color)), false);
            }
        }

        if self.placing {
            self.draw_preview(term, &cell_str);
        }

        let (width, height) = term.size();
        if self.show_ui {
            self.draw_status(term, width, height.saturating_sub(1));
        }
        if self.show_help {
            render_help_overlay(term, width, height, &self.help_text);
        }
    }

    fn draw_preview(&self, term: &mut Terminal, cell_str: &str) {
        let shade = Some(to_term(dim(self.selection.color())));
        if let Some(template) = self.selection.pattern() {
            let origin = self.cursor - template.center();
            for &offset in template.cells() {
                let cell = origin + offset;
                if self.sim.grid().is_alive(cell) {
                    continue;
                }
                if let Some((x, y)) = self.viewport.cell_to_screen(cell) {
                    term.set_str(x as i32, y as i32, cell_str, shade, false);
                }
            }
        }
        if let Some((x, y)) = self.viewport.cell_to_screen(self.cursor) {
            term.set(x as i32, y as i32, '+', Some(Color::White), true);
        }
    }

    fn draw_status(&self, term: &mut Terminal, width: u16, row: u16) {
        let mut parts: Vec<(String, StatusColor)> = vec![
            (format!("gen {}", self.sim.generation()), StatusColor::Info),
            (format!("alive {}", self.sim.alive_count()), StatusColor::Info),
            (
                format!("wrap {}", if self.sim.wrap_enabled() { "on" } else { "off" }),
                StatusColor::Muted,
            ),
            (
                if self.scheduler.is_running() { "running" } else { "paused" }.to_string(),
                if self.scheduler.is_running() { StatusColor::Good } else { StatusColor::Warning },
            ),
            (
                format!("{} {}", self.selection.pattern_name(), to_hex(self.selection.color())),
                StatusColor::Good,
            ),
        ];
        if self.placing {
            parts.push(("placing".to_string(), StatusColor::Warning));
        }
        if self.interpreter.has_buffer() {
            let mut buffer = format!("x{}", self.interpreter.repeat_count());
            if self.interpreter.random_color() {
                buffer.push_str(" +color");
            }
            if self.interpreter.random_pattern() {
                buffer.push_str(" +pattern");
            }
            parts.push((buffer, StatusColor::Warning));
        }
        if let Some(g) = self.sim.cycle_at() {
            parts.push((format!("cycle@{g}"), StatusColor::Muted));
        }
        if let Some(notice) = self.notice() {
            parts.push((notice.to_string(), StatusColor::Warning));
        }

        let mut x = 0i32;
        for (i, (text, color)) in parts.iter().enumerate() {
            if i > 0 {
                term.set_str(x, row as i32, " | ", Some(Color::DarkGrey), false);
                x += 3;
            }
            if x >= width as i32 {
                break;
            }
            term.set_str(x, row as i32, text, Some(color.term()), false);
            x += text.chars().count() as i32;
        }
    }
}

/// Run the interactive session until quit.
pub fn run(config: SimConfig, library: PatternLibrary) -> Result<(), LifeError> {
    let mut term = Terminal::new()?;
    let mut app = App::new(config, library, term.size());
    app.seed();

    let mut last = Instant::now();
    loop {
        if term.refresh_size()? {
            let (w, h) = term.size();
            app.resize(w, h);
        }

        let mut raw = Vec::new();
        while let Some(event) = term.next_event()? {
            raw.push(event);
        }
        let events = app.translate(&raw);

        let now = Instant::now();
        if !app.frame(&events, now, now - last)? {
            break;
        }
        last = now;

        app.draw(&mut term);
        term.render()?;
        term.sleep(FRAME_TIME);
    }
    Ok(())
}
