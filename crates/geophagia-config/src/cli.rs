//! Command-line overrides shared by every Geophagia binary.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global flags; values given here override `config.ron`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Height field width in samples.
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Height field depth in samples.
    #[arg(long, global = true)]
    pub depth: Option<u32>,

    /// Texture repeats across the terrain mesh.
    #[arg(long, global = true)]
    pub texture_scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.width = w;
        }
        if let Some(d) = args.depth {
            self.terrain.depth = d;
        }
        if let Some(scale) = args.texture_scale {
            self.terrain.texture_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
