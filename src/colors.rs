use crate::error::LifeError;
use crate::life::Rgba;
use crossterm::style::Color;

/// Palette used when the settings file does not provide one
pub const DEFAULT_PALETTE: [Rgba; 8] = [
    Rgba::rgb(50, 205, 50),   // lime
    Rgba::rgb(0, 191, 255),   // sky
    Rgba::rgb(255, 99, 71),   // tomato
    Rgba::rgb(255, 215, 0),   // gold
    Rgba::rgb(218, 112, 214), // orchid
    Rgba::rgb(64, 224, 208),  // turquoise
    Rgba::rgb(255, 140, 0),   // orange
    Rgba::rgb(240, 240, 240), // white
];

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Result<Rgba, LifeError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(LifeError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| LifeError::InvalidColor(s.to_string()));
    Ok(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn to_hex(c: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

pub fn to_term(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Darkened copy, used for the placement preview
pub fn dim(c: Rgba) -> Rgba {
    Rgba::rgb(c.r / 3, c.g / 3, c.b / 3)
}

/// Semantic colors for the status line
#[derive(Clone, Copy)]
pub enum StatusColor {
    Good,
    Warning,
    Info,
    Muted,
}

impl StatusColor {
    pub fn term(self) -> Color {
        match self {
            StatusColor::Good => Color::Green,
            StatusColor::Warning => Color::Yellow,
            StatusColor::Info => Color::Cyan,
            StatusColor::Muted => Color::DarkGrey,
        }
    }
}
