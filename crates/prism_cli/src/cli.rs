use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};

/// Log levels accepted on the command line
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A recursive ray caster for OBJ meshes and spheres")]
pub struct Args {
    /// Driver file describing the camera, lights and geometry
    pub driver: PathBuf,

    /// Output image (.ppm is written as ASCII P3, other extensions via the image crate)
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    pub sequential: bool,

    /// Bucket edge length in pixels for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Scale reflected colour by each material's Kr
    #[arg(long)]
    pub attenuate_reflections: bool,

    /// Write a primary-ray depth heat map instead of the shaded image
    #[arg(long)]
    pub depth_map: bool,

    /// Also write every placed model to DIR as <name>_mwNN.obj
    #[arg(long, value_name = "DIR")]
    pub export_models: Option<PathBuf>,

    /// Override the driver file's recursion level
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,
}

impl Args {
    /// Reflection depth to render with: `--depth` if given, else the driver's.
    pub fn recursion_depth(&self, driver_depth: u32) -> u32 {
        self.depth.unwrap_or(driver_depth)
    }

    /// Apply the command line overrides to `config`.
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        config.parallel = !self.sequential;
        config.bucket_size = self.bucket_size;
        config.attenuate_reflections = self.attenuate_reflections;
        config
    }
}
