//! File-backed logging
//!
//! The interactive screen runs in raw mode, so log output cannot share the
//! terminal. Records are piped to a file instead, one timestamped line each.

use crate::error::LifeError;
use chrono::{DateTime, Local};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

fn format_line(at: DateTime<Local>, level: log::Level, target: &str, message: &str) -> String {
    format!("{} {:<5} [{}] {}", at.format("%Y-%m-%d %H:%M:%S%.3f"), level, target, message)
}

pub fn parse_level(name: &str) -> Result<LevelFilter, LifeError> {
    LevelFilter::from_str(name.trim()).map_err(|_| LifeError::InvalidLogLevel(name.to_string()))
}

fn builder(level: LevelFilter, file: File) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let message = record.args().to_string();
            writeln!(buf, "{}", format_line(Local::now(), record.level(), record.target(), &message))
        });
    builder
}

/// Install the global logger. Without a path logging stays off.
pub fn init(path: Option<&Path>, level: &str) -> Result<(), LifeError> {
    let level = parse_level(level)?;
    let Some(path) = path else {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    builder(level, file).try_init()?;
    Ok(())
}
