//! Dispatch over the available heightmap synthesis strategies.

use std::time::Instant;

use crate::{
    FractalParams, FractalSynthesizer, HeightField, MultifractalParams, MultifractalSynthesizer,
    TerrainError, VoronoiParams, VoronoiSynthesizer,
};

/// One configured heightmap generator.
///
/// The editor session holds one of these per "Generate" request and lends
/// it the height field mutably for the duration of [`generate`](Self::generate)
/// only.
#[derive(Clone, Debug)]
pub enum HeightmapGenerator {
    /// Fixed-ratio fBm.
    Fractal(FractalSynthesizer),
    /// fBm or ridged noise with tunable persistence and lacunarity.
    Multifractal(MultifractalSynthesizer),
    /// Nearest-centroid plateaus.
    Voronoi(VoronoiSynthesizer),
}

impl HeightmapGenerator {
    /// Fractal generator from parameters.
    pub fn fractal(params: FractalParams) -> Self {
        Self::Fractal(FractalSynthesizer::new(params))
    }

    /// Multifractal generator from parameters.
    pub fn multifractal(params: MultifractalParams) -> Self {
        Self::Multifractal(MultifractalSynthesizer::new(params))
    }

    /// Voronoi generator from parameters.
    pub fn voronoi(params: VoronoiParams) -> Self {
        Self::Voronoi(VoronoiSynthesizer::new(params))
    }

    /// Short name for logs and UI labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fractal(_) => "fbm",
            Self::Multifractal(_) => "multifractal",
            Self::Voronoi(_) => "voronoi",
        }
    }

    /// Overwrite `field` with a freshly synthesized grid of the same size.
    ///
    /// On any error the field keeps its previous contents.
    pub fn generate(&self, field: &mut HeightField) -> Result<(), TerrainError> {
        let start = Instant::now();
        match self {
            Self::Fractal(synth) => synth.generate(field)?,
            Self::Multifractal(synth) => synth.generate(field)?,
            Self::Voronoi(synth) => synth.generate(field)?,
        }
        tracing::debug!(
            generator = self.name(),
            width = field.width(),
            depth = field.depth(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "heightmap generated"
        );
        Ok(())
    }
}
