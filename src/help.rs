use crate::input::{InputEvent, Keymap};
use crate::terminal::Terminal;
use crossterm::style::Color;

/// Help rows: label and the event whose keys are listed
const HELP_ROWS: &[(&str, InputEvent)] = &[
    ("Spawn at random", InputEvent::Spawn),
    ("Random color (mod)", InputEvent::RandomColor),
    ("Random pattern (mod)", InputEvent::RandomPattern),
    ("Placement mode", InputEvent::TogglePlacement),
    ("Place at cursor", InputEvent::Place),
    ("Cancel placement", InputEvent::CancelPlacement),
    ("Next pattern", InputEvent::PatternNext),
    ("Prev pattern", InputEvent::PatternPrev),
    ("Next color", InputEvent::ColorNext),
    ("Prev color", InputEvent::ColorPrev),
    ("Wraparound", InputEvent::ToggleWrap),
    ("Grid lines", InputEvent::ToggleGrid),
    ("Status line", InputEvent::ToggleUi),
    ("Pause/resume", InputEvent::Pause),
    ("Reseed", InputEvent::Reseed),
    ("Clear", InputEvent::Clear),
    ("Help", InputEvent::Help),
    ("Quit", InputEvent::Quit),
];

/// Help text for the current key bindings
pub fn build_help(keymap: &Keymap) -> String {
    let mut text = String::from("LIFEGRID\n─────────────────────────────\n");
    text.push_str("0-9       Repeat count for spawn\n");
    for (label, event) in HELP_ROWS {
        let keys: Vec<&str> = keymap
            .keys_for(*event)
            .into_iter()
            .map(|k| if k == " " { "Space" } else { k })
            .collect();
        if keys.is_empty() {
            continue;
        }
        text.push_str(&format!("{:<9} {}\n", keys.join("/"), label));
    }
    text.push_str("Arrows    Pan view\n");
    text.push_str("Mouse     L: place  R: cancel");
    text
}

/// Render a centered help box into the back buffer.
pub fn render_help_overlay(term: &mut Terminal, width: u16, height: u16, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4;
    let box_height = lines.len() + 2;

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    let right = (start_x + box_width - 1) as i32;
    let bottom = (start_y + box_height - 1) as i32;
    for x in start_x + 1..start_x + box_width - 1 {
        term.set(x as i32, start_y as i32, '─', border, false);
        term.set(x as i32, bottom, '─', border, false);
    }
    term.set(start_x as i32, start_y as i32, '┌', border, false);
    term.set(right, start_y as i32, '┐', border, false);
    term.set(start_x as i32, bottom, '└', border, false);
    term.set(right, bottom, '┘', border, false);

    for (i, line) in lines.iter().enumerate() {
        let y = (start_y + 1 + i) as i32;
        term.set(start_x as i32, y, '│', border, false);
        let padding = max_width.saturating_sub(line.chars().count());
        term.set_str(start_x as i32 + 1, y, &format!(" {}{} ", line, " ".repeat(padding)), text, false);
        term.set(right, y, '│', border, false);
    }
}
