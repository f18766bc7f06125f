use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log verbosity selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene file (or the built-in demo) to a PNG.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Reflection ray tracer")]
pub struct Args {
    /// JSON scene file; renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Extra jittered rays per pixel (overrides the scene file)
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum reflection depth (overrides the scene file)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Sampling seed (overrides the scene file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Initialize env_logger; `RUST_LOG` filters still apply on top of `level`.
pub fn init_logger(level: LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(level.into())
        .init();
}
