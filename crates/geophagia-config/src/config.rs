//! Configuration sections, their defaults, and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings for the interactive shell.
    pub window: WindowConfig,
    /// Height field and mesh defaults.
    pub terrain: TerrainConfig,
    /// Fractal generator parameters.
    pub fractal: FractalConfig,
    /// Voronoi generator parameters.
    pub voronoi: VoronoiConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Pattern a freshly sized height field starts with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PreviewPattern {
    /// Every sample at zero.
    #[default]
    Flat,
    /// Alternating low/high squares.
    Checkerboard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid samples along X.
    pub width: u32,
    /// Grid samples along Z.
    pub depth: u32,
    /// Texture repeats across the whole mesh.
    pub texture_scale: f32,
    /// Initial pattern.
    pub preview: PreviewPattern,
    /// Checkerboard square size in samples.
    pub checker_cell: u32,
}

/// Octave accumulation used by the multifractal generator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoiseMode {
    #[default]
    Fbm,
    Ridged,
}

/// Fractal generator parameters.
///
/// `persistence`, `lacunarity` and `mode` only affect the multifractal
/// generator; plain fBm always halves amplitude and doubles frequency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FractalConfig {
    pub seed: u64,
    /// Clamped to `1..=8` at generation time, so negative values load fine.
    pub octaves: i32,
    pub power_scale: f32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub mode: NoiseMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoronoiConfig {
    pub seed: u64,
    /// Below one is reported as a warning when generating, not a load error.
    pub centroids: i32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Geophagia".to_string(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 256,
            depth: 256,
            texture_scale: 1.0,
            preview: PreviewPattern::Flat,
            checker_cell: 16,
        }
    }
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            power_scale: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            mode: NoiseMode::Fbm,
        }
    }
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            centroids: 15,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let serialized = self.to_ron_pretty()?;
        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// The config as pretty RON, exactly as [`save`](Self::save) writes it.
    pub fn to_ron_pretty(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)
    }

    /// Re-read the file; `Some(new_config)` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let ron_str = ron::ser::to_string_pretty(
            &Config::default(),
            ron::ser::PrettyConfig::new().depth_limit(3),
        )
        .unwrap();
        assert!(ron_str.contains("width: 256"));
        assert!(ron_str.contains("centroids: 15"));
        assert!(ron_str.contains("preview: Flat"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.fractal.mode = NoiseMode::Ridged;
        config.terrain.preview = PreviewPattern::Checkerboard;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_generator_defaults() {
        let config = Config::default();
        assert_eq!(config.fractal.octaves, 3);
        assert_eq!(config.fractal.power_scale, 1.0);
        assert_eq!(config.fractal.persistence, 0.5);
        assert_eq!(config.fractal.lacunarity, 2.0);
        assert_eq!(config.voronoi.centroids, 15);
        assert_eq!(config.terrain.texture_scale, 1.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(terrain: (width: 64))").unwrap();
        assert_eq!(config.terrain.width, 64);
        assert_eq!(config.terrain.depth, 256, "Missing field must default");
        assert_eq!(config.voronoi, VoronoiConfig::default());
    }

    #[test]
    fn test_negative_counts_parse() {
        let config: Config =
            ron::from_str("(fractal: (octaves: -2, seed: 9), voronoi: (centroids: -1))").unwrap();
        assert_eq!(config.fractal.octaves, -2);
        assert_eq!(config.fractal.seed, 9);
        assert_eq!(config.voronoi.centroids, -1);
        assert_eq!(config.terrain, TerrainConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.width = 512;
        config.fractal.seed = 77;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_saved_file_matches_pretty_ron() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.title = "Ridges".to_string();
        config.save(dir.path()).unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let pretty = config.to_ron_pretty().unwrap();
        assert_eq!(on_disk, pretty);
        assert!(pretty.contains("title: \"Ridges\""));
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        let config = Config::load_or_create(&sub).unwrap();
        assert_eq!(config, Config::default());
        assert!(sub.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.voronoi.centroids = 40;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.voronoi.centroids), Some(40));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
