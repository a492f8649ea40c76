mod app;
mod colors;
mod config;
mod error;
mod help;
mod input;
mod life;
mod logging;
mod print;
mod scheduler;
mod selection;
mod settings;
mod sim;
mod terminal;
mod viewport;

use clap::{Args, Parser, Subcommand};
use config::{interval_from_secs, SimConfig};
use error::LifeError;
use life::PatternLibrary;
use print::PrintConfig;
use settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifegrid")]
#[command(version)]
#[command(about = "Terminal Game of Life with pattern stamping, wraparound and cycle detection", long_about = None)]
struct Cli {
    /// Settings file [default: <config dir>/lifegrid/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra pattern file (.toml or .json) merged into the library
    #[arg(long, global = true)]
    patterns: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive simulation (default)
    Run(RunArgs),

    /// Run a pattern for a number of generations and print the result
    Print {
        /// Pattern to seed
        #[arg(short, long, default_value = "glider")]
        pattern: String,

        /// Generations to run
        #[arg(short, long, default_value = "10")]
        generations: u64,

        /// Region width in cells
        #[arg(short = 'W', long, default_value = "20")]
        width: i32,

        /// Region height in cells
        #[arg(short = 'H', long, default_value = "20")]
        height: i32,

        /// Wrap neighbors around the region edges
        #[arg(short, long)]
        wrap: bool,
    },

    /// List available patterns
    Patterns,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Pattern to seed at start
    #[arg(short, long)]
    pattern: Option<String>,

    /// Seconds between generations
    #[arg(short, long)]
    interval: Option<f32>,

    /// Start with wraparound enabled
    #[arg(short, long)]
    wrap: bool,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Character used to draw living cells
    #[arg(short, long)]
    char: Option<char>,

    /// Seed at the genesis point instead of the view center
    #[arg(long)]
    no_center: bool,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("lifegrid: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), LifeError> {
    let settings = Settings::load(cli.config.as_deref())?;

    let mut library = PatternLibrary::builtin();
    library.extend(settings.patterns.iter().cloned());
    if let Some(path) = &cli.patterns {
        library.load_file(path)?;
    }

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let log_file = args.log_file.or_else(|| settings.log.file.clone());
            let log_level = args
                .log_level
                .or_else(|| settings.log.level.clone())
                .unwrap_or_else(|| "warn".to_string());
            logging::init(log_file.as_deref(), &log_level)?;

            let mut config = SimConfig::from_settings(&settings)?;
            if let Some(pattern) = args.pattern {
                library.find(&pattern)?;
                config.pattern = Some(pattern);
            }
            if let Some(secs) = args.interval {
                config.interval = interval_from_secs(secs)?;
            }
            if args.wrap {
                config.wrap = true;
            }
            if args.no_center {
                config.cell_centered = false;
            }
            if let Some(c) = args.char {
                config.draw_char = c;
            }
            config.seed = args.seed;

            app::run(config, library)
        }
        Commands::Print {
            pattern,
            generations,
            width,
            height,
            wrap,
        } => {
            let config = PrintConfig {
                pattern,
                generations,
                width,
                height,
                wrap,
            };
            print!("{}", print::run(&library, &config)?);
            Ok(())
        }
        Commands::Patterns => {
            for template in library.iter() {
                let (w, h) = template.size();
                println!("{:<14} {:>3} cells  {}x{}", template.name(), template.cells().len(), w, h);
            }
            Ok(())
        }
    }
}
