use crate::error::LifeError;
use crate::life::PatternDef;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sim: SimSettings,
    #[serde(default)]
    pub palette: PaletteSettings,
    #[serde(default)]
    pub patterns: Vec<PatternDef>,
    #[serde(default)]
    pub keys: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimSettings {
    pub interval: Option<f32>,       // seconds between generations
    pub input_timeout: Option<f32>,  // seconds before a typed count is forgotten
    pub wrap: Option<bool>,
    pub cell_centered: Option<bool>, // seed at viewport center instead of genesis
    pub genesis: Option<[i32; 2]>,
    pub pattern: Option<String>,
    pub fallback_color: Option<String>,
    pub draw_char: Option<char>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaletteSettings {
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, LifeError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, LifeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifegrid")
            .join("config.toml")
    }
}
