//! Command input: per-frame interpreter and key mapping
//!
//! Raw terminal events are mapped to [`InputEvent`]s by a [`Keymap`], then fed
//! once per frame to the [`CommandInterpreter`]. The interpreter keeps two
//! independent layers:
//!
//! - a buffered layer (repeat count, random-color and random-pattern modifiers)
//!   that survives across frames and is reset after a period of inactivity;
//! - one-shot [`Triggers`] valid for a single consumption cycle.
//!
//! Neither layer is cleared by `poll`. The consumer reads both, acts, then calls
//! [`CommandInterpreter::clear_triggers`] and, for actions that use up the
//! buffer, [`CommandInterpreter::reset_buffer`].

use crate::error::LifeError;
use crate::life::Cell;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::borrow::Cow;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Largest repeat count that can be typed
pub const MAX_REPEAT: u32 = 9999;

/// Default inactivity window before the buffered layer resets
pub const DEFAULT_INPUT_TIMEOUT: Duration = Duration::from_millis(1500);

/// Discrete input event, independent of the physical key that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Digit(u8),
    RandomColor,
    RandomPattern,
    ToggleGrid,
    ToggleUi,
    ToggleWrap,
    TogglePlacement,
    Spawn,
    Place,
    CancelPlacement,
    PatternNext,
    PatternPrev,
    ColorNext,
    ColorPrev,
    Pause,
    Reseed,
    Clear,
    Help,
    Quit,
    Pan(i32, i32),
    PointerPrimary { column: u16, row: u16 },
    PointerSecondary,
    PointerMove { column: u16, row: u16 },
}

/// One-shot flags raised during a poll. Cleared only by the consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub toggle_grid: bool,
    pub toggle_ui: bool,
    pub toggle_wrap: bool,
    pub toggle_placement: bool,
    pub spawn: bool,
    pub placement_click: bool,
    pub placement_cancel: bool,
    pub pattern_next: bool,
    pub pattern_prev: bool,
    pub color_next: bool,
    pub color_prev: bool,
    pub pause: bool,
    pub reseed: bool,
    pub clear: bool,
    pub help: bool,
    pub quit: bool,
    /// Accumulated pan request in grid cells
    pub pan: Cell,
    /// Screen position of the last pointer event, if any this frame
    pub pointer: Option<(u16, u16)>,
}

impl Triggers {
    pub fn any(&self) -> bool {
        *self != Triggers::default()
    }
}

/// Stateful per-frame input protocol
#[derive(Debug)]
pub struct CommandInterpreter {
    timeout: Duration,
    repeat_count: u32,
    digits_entered: bool,
    random_color: bool,
    random_pattern: bool,
    last_activity: Option<Instant>,
    triggers: Triggers,
}

impl CommandInterpreter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            repeat_count: 1,
            digits_entered: false,
            random_color: false,
            random_pattern: false,
            last_activity: None,
            triggers: Triggers::default(),
        }
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn random_color(&self) -> bool {
        self.random_color
    }

    pub fn random_pattern(&self) -> bool {
        self.random_pattern
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// True while anything is buffered (for status display)
    pub fn has_buffer(&self) -> bool {
        self.digits_entered || self.random_color || self.random_pattern
    }

    /// Process this frame's events.
    ///
    /// The buffered layer is reset first if the last digit or modifier is older
    /// than the timeout.
    pub fn poll(&mut self, events: &[InputEvent], now: Instant) {
        if let Some(last) = self.last_activity {
            if now.saturating_duration_since(last) > self.timeout {
                self.reset_buffer();
            }
        }

        for &event in events {
            self.apply(event, now);
        }
    }

    fn apply(&mut self, event: InputEvent, now: Instant) {
        let t = &mut self.triggers;
        match event {
            InputEvent::Digit(d) => {
                let d = d.min(9) as u32;
                if !self.digits_entered {
                    // a leading zero never starts a number
                    if d == 0 {
                        return;
                    }
                    self.repeat_count = d;
                    self.digits_entered = true;
                } else {
                    self.repeat_count = self.repeat_count.saturating_mul(10).saturating_add(d).min(MAX_REPEAT);
                }
                self.last_activity = Some(now);
            }
            InputEvent::RandomColor => {
                self.random_color = true;
                self.last_activity = Some(now);
            }
            InputEvent::RandomPattern => {
                self.random_pattern = true;
                self.last_activity = Some(now);
            }
            InputEvent::ToggleGrid => t.toggle_grid = true,
            InputEvent::ToggleUi => t.toggle_ui = true,
            InputEvent::ToggleWrap => t.toggle_wrap = true,
            InputEvent::TogglePlacement => t.toggle_placement = true,
            InputEvent::Spawn => {
                t.spawn = true;
                self.repeat_count = self.repeat_count.max(1);
            }
            InputEvent::Place => t.placement_click = true,
            InputEvent::CancelPlacement => t.placement_cancel = true,
            InputEvent::PatternNext => t.pattern_next = true,
            InputEvent::PatternPrev => t.pattern_prev = true,
            InputEvent::ColorNext => t.color_next = true,
            InputEvent::ColorPrev => t.color_prev = true,
            InputEvent::Pause => t.pause = true,
            InputEvent::Reseed => t.reseed = true,
            InputEvent::Clear => t.clear = true,
            InputEvent::Help => t.help = true,
            InputEvent::Quit => t.quit = true,
            InputEvent::Pan(dx, dy) => t.pan = t.pan + Cell::new(dx, dy),
            InputEvent::PointerPrimary { column, row } => {
                t.placement_click = true;
                t.pointer = Some((column, row));
            }
            InputEvent::PointerSecondary => t.placement_cancel = true,
            InputEvent::PointerMove { column, row } => t.pointer = Some((column, row)),
        }
    }

    pub fn clear_triggers(&mut self) {
        self.triggers = Triggers::default();
    }

    /// Back to count 1 with no modifiers.
    pub fn reset_buffer(&mut self) {
        self.repeat_count = 1;
        self.digits_entered = false;
        self.random_color = false;
        self.random_pattern = false;
        self.last_activity = None;
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_TIMEOUT)
    }
}

/// Action names accepted in the `[keys]` settings table
const ACTIONS: &[(&str, InputEvent)] = &[
    ("random_color", InputEvent::RandomColor),
    ("random_pattern", InputEvent::RandomPattern),
    ("toggle_grid", InputEvent::ToggleGrid),
    ("toggle_ui", InputEvent::ToggleUi),
    ("toggle_wrap", InputEvent::ToggleWrap),
    ("toggle_placement", InputEvent::TogglePlacement),
    ("spawn", InputEvent::Spawn),
    ("place", InputEvent::Place),
    ("cancel", InputEvent::CancelPlacement),
    ("pattern_next", InputEvent::PatternNext),
    ("pattern_prev", InputEvent::PatternPrev),
    ("color_next", InputEvent::ColorNext),
    ("color_prev", InputEvent::ColorPrev),
    ("pause", InputEvent::Pause),
    ("reseed", InputEvent::Reseed),
    ("clear", InputEvent::Clear),
    ("help", InputEvent::Help),
    ("quit", InputEvent::Quit),
    ("pan_left", InputEvent::Pan(-1, 0)),
    ("pan_right", InputEvent::Pan(1, 0)),
    ("pan_up", InputEvent::Pan(0, -1)),
    ("pan_down", InputEvent::Pan(0, 1)),
];

const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("c", "random_color"),
    ("p", "random_pattern"),
    ("g", "toggle_grid"),
    ("u", "toggle_ui"),
    ("w", "toggle_wrap"),
    ("v", "toggle_placement"),
    ("r", "spawn"),
    ("Enter", "place"),
    ("Escape", "cancel"),
    ("]", "pattern_next"),
    ("[", "pattern_prev"),
    (".", "color_next"),
    (",", "color_prev"),
    (" ", "pause"),
    ("s", "reseed"),
    ("x", "clear"),
    ("?", "help"),
    ("q", "quit"),
    ("Ctrl+c", "quit"),
    ("Left", "pan_left"),
    ("h", "pan_left"),
    ("Right", "pan_right"),
    ("l", "pan_right"),
    ("Up", "pan_up"),
    ("k", "pan_up"),
    ("Down", "pan_down"),
    ("j", "pan_down"),
];

fn action(name: &str) -> Option<InputEvent> {
    ACTIONS.iter().find(|(n, _)| *n == name).map(|&(_, e)| e)
}

fn action_name(event: InputEvent) -> &'static str {
    ACTIONS.iter().find(|(_, e)| *e == event).map_or("digit", |&(n, _)| n)
}

/// Physical key → [`InputEvent`] table
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, InputEvent>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .filter_map(|&(key, name)| action(name).map(|e| (key.to_string(), e)))
            .collect();
        Self { bindings }
    }
}

impl Keymap {
    /// Defaults with per-action overrides. Each listed action loses its default
    /// keys and gets exactly the keys given. A key may belong to one action
    /// only, whether it comes from an override or a remaining default.
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Result<Self, LifeError> {
        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();

        let mut keymap = Self::default();
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let event = action(name).ok_or_else(|| LifeError::InvalidKey(format!("unknown action '{name}'")))?;
            keymap.bindings.retain(|_, e| *e != event);
            resolved.push((name, event));
        }

        for (name, event) in resolved {
            for key in &overrides[name] {
                if key.is_empty() {
                    return Err(LifeError::InvalidKey(format!("empty key for '{name}'")));
                }
                match keymap.bindings.get(key) {
                    Some(&other) if other != event => {
                        return Err(LifeError::InvalidKey(format!(
                            "'{key}' is bound to both '{}' and '{name}'",
                            action_name(other)
                        )));
                    }
                    _ => {
                        keymap.bindings.insert(key.clone(), event);
                    }
                }
            }
        }
        Ok(keymap)
    }

    pub fn map_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
        let code = normalize_key(code, modifiers);
        let name = key_to_string(code, modifiers);
        if let Some(&event) = self.bindings.get(&*name) {
            return Some(event);
        }
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() && !modifiers.contains(KeyModifiers::CONTROL) => {
                c.to_digit(10).map(|d| InputEvent::Digit(d as u8))
            }
            _ => None,
        }
    }

    /// Keys bound to `event`, sorted, for the help overlay
    pub fn keys_for(&self, event: InputEvent) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, e)| **e == event)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerPrimary { column, row }),
        MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::PointerSecondary),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputEvent::PointerMove { column, row }),
        _ => None,
    }
}

fn normalize_key(code: KeyCode, mods: KeyModifiers) -> KeyCode {
    if code == KeyCode::Char('/') && mods.contains(KeyModifiers::SHIFT) {
        KeyCode::Char('?')
    } else {
        code
    }
}

/// Key name as written in the settings file, e.g. `r`, `Ctrl+c`, `Escape`.
fn key_to_string(code: KeyCode, modifiers: KeyModifiers) -> Cow<'static, str> {
    let key_name: Cow<'static, str> = match code {
        KeyCode::Char(' ') => Cow::Borrowed(" "),
        KeyCode::Char(c) => Cow::Owned(c.to_string()),
        KeyCode::Enter => Cow::Borrowed("Enter"),
        KeyCode::Esc => Cow::Borrowed("Escape"),
        KeyCode::Tab => Cow::Borrowed("Tab"),
        KeyCode::Backspace => Cow::Borrowed("Backspace"),
        KeyCode::Left => Cow::Borrowed("Left"),
        KeyCode::Right => Cow::Borrowed("Right"),
        KeyCode::Up => Cow::Borrowed("Up"),
        KeyCode::Down => Cow::Borrowed("Down"),
        KeyCode::Home => Cow::Borrowed("Home"),
        KeyCode::End => Cow::Borrowed("End"),
        KeyCode::F(n) => Cow::Owned(format!("F{}", n)),
        _ => Cow::Borrowed("Unknown"),
    };

    let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = modifiers.contains(KeyModifiers::ALT);
    // Shift is already folded into printable characters
    let has_shift = modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_));

    if !has_ctrl && !has_alt && !has_shift {
        return key_name;
    }

    let mut result = String::with_capacity(16);
    if has_ctrl {
        result.push_str("Ctrl+");
    }
    if has_alt {
        result.push_str("Alt+");
    }
    if has_shift {
        result.push_str("Shift+");
    }
    result.push_str(&key_name);
    Cow::Owned(result)
}
