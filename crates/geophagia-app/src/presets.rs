//! Building generators and preview fields from configuration.

use geophagia_config::{FractalConfig, NoiseMode, PreviewPattern, TerrainConfig, VoronoiConfig};
use geophagia_terrain::{
    FractalMode, FractalParams, HeightField, HeightmapGenerator, MultifractalParams,
    OUTPUT_SCALE, TerrainError, VoronoiParams,
};

/// Plain fBm from the `fractal` section (persistence, lacunarity and mode
/// are ignored).
pub fn fractal_generator(config: &FractalConfig) -> HeightmapGenerator {
    HeightmapGenerator::fractal(FractalParams {
        seed: config.seed,
        octaves: config.octaves,
        power_scale: config.power_scale,
    })
}

/// Multifractal generator from the `fractal` section, with `mode`
/// overriding the configured one when given.
pub fn multifractal_generator(config: &FractalConfig, mode: Option<NoiseMode>) -> HeightmapGenerator {
    let mode = match mode.unwrap_or(config.mode) {
        NoiseMode::Fbm => FractalMode::Fbm,
        NoiseMode::Ridged => FractalMode::Ridged,
    };
    HeightmapGenerator::multifractal(MultifractalParams {
        seed: config.seed,
        octaves: config.octaves,
        power_scale: config.power_scale,
        persistence: config.persistence,
        lacunarity: config.lacunarity,
        mode,
    })
}

pub fn voronoi_generator(config: &VoronoiConfig) -> HeightmapGenerator {
    HeightmapGenerator::voronoi(VoronoiParams {
        seed: config.seed,
        centroids: config.centroids,
    })
}

/// The field a new session shows before anything is generated or loaded.
///
/// Checkerboards alternate between 0 and the full synthesizer output range.
pub fn preview_field(config: &TerrainConfig) -> Result<HeightField, TerrainError> {
    match config.preview {
        PreviewPattern::Flat => HeightField::flat(config.width, config.depth),
        PreviewPattern::Checkerboard => HeightField::checkerboard(
            config.width,
            config.depth,
            config.checker_cell,
            0.0,
            OUTPUT_SCALE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geophagia_config::Config;

    #[test]
    fn test_generators_carry_config_values() {
        let mut config = Config::default();
        config.fractal.seed = 9;
        config.fractal.mode = NoiseMode::Ridged;
        config.voronoi.centroids = 3;

        let HeightmapGenerator::Fractal(fbm) = fractal_generator(&config.fractal) else {
            panic!("expected fractal generator");
        };
        assert_eq!(fbm.params().seed, 9);

        let HeightmapGenerator::Multifractal(multi) = multifractal_generator(&config.fractal, None)
        else {
            panic!("expected multifractal generator");
        };
        assert_eq!(multi.params().mode, FractalMode::Ridged);

        let HeightmapGenerator::Multifractal(multi) =
            multifractal_generator(&config.fractal, Some(NoiseMode::Fbm))
        else {
            panic!("expected multifractal generator");
        };
        assert_eq!(multi.params().mode, FractalMode::Fbm, "Explicit mode wins");

        let HeightmapGenerator::Voronoi(voronoi) = voronoi_generator(&config.voronoi) else {
            panic!("expected voronoi generator");
        };
        assert_eq!(voronoi.params().centroids, 3);
    }

    #[test]
    fn test_preview_patterns() {
        let mut terrain = TerrainConfig {
            width: 8,
            depth: 4,
            ..TerrainConfig::default()
        };
        let flat = preview_field(&terrain).unwrap();
        assert_eq!((flat.width(), flat.depth()), (8, 4));
        assert_eq!(flat.min_max(), Some((0.0, 0.0)));

        terrain.preview = PreviewPattern::Checkerboard;
        terrain.checker_cell = 2;
        let checker = preview_field(&terrain).unwrap();
        assert_eq!(checker.min_max(), Some((0.0, OUTPUT_SCALE)));
        assert_eq!(checker.get(0, 0), Some(0.0));
        assert_eq!(checker.get(2, 0), Some(OUTPUT_SCALE));
    }

    #[test]
    fn test_preview_rejects_zero_size() {
        let terrain = TerrainConfig {
            width: 0,
            ..TerrainConfig::default()
        };
        assert!(matches!(
            preview_field(&terrain),
            Err(TerrainError::ZeroDimension { .. })
        ));
    }
}
