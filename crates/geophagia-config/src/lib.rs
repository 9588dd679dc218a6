//! Editor configuration for Geophagia.
//!
//! Settings persist to disk as `config.ron`. Every section defaults
//! independently, so old files keep loading as fields are added, and CLI
//! flags can override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, FractalConfig, NoiseMode, PreviewPattern,
    TerrainConfig, VoronoiConfig, WindowConfig,
};
pub use error::ConfigError;
