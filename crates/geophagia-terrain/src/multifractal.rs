//! General fractal synthesis with tunable octave ratios.
//!
//! Same noise, base frequency and normalization as
//! [`FractalSynthesizer`](crate::FractalSynthesizer), but amplitude and
//! frequency change per octave by `persistence` and `lacunarity`, and octaves
//! can be folded into ridges instead of summed as plain fBm.

use glam::Vec2;

use crate::TerrainError;
use crate::fractal::{
    BASE_FREQUENCY, MAX_OCTAVES, MIN_OCTAVES, normalize_and_reshape, validate_power_scale,
};
use crate::height_field::{HeightField, validate_dimensions};
use crate::noise_field::NoiseField;

/// How each octave's noise sample contributes to the sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FractalMode {
    /// `amplitude * (sample + 1) / 2`.
    #[default]
    Fbm,
    /// Ridged multifractal: `amplitude * (1 - |sample|)^2`, sharp crests
    /// along the noise zero-crossings.
    Ridged,
}

/// Parameters for [`MultifractalSynthesizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct MultifractalParams {
    /// Seed for the noise tables.
    pub seed: u64,
    /// Number of octaves, clamped like plain fBm.
    pub octaves: i32,
    /// Reshape exponent applied after normalization.
    pub power_scale: f32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Octave combination rule.
    pub mode: FractalMode,
}

impl Default for MultifractalParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            power_scale: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            mode: FractalMode::Fbm,
        }
    }
}

impl MultifractalParams {
    /// Octave count after clamping into the supported range.
    pub fn clamped_octaves(&self) -> i32 {
        self.octaves.clamp(MIN_OCTAVES, MAX_OCTAVES)
    }

    fn validate(&self) -> Result<(), TerrainError> {
        validate_power_scale(self.power_scale)?;
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(TerrainError::InvalidPersistence(self.persistence));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(TerrainError::InvalidLacunarity(self.lacunarity));
        }
        Ok(())
    }
}

/// Generates elevation fields from configurable fBm or ridged multifractal
/// noise.
#[derive(Clone, Debug, Default)]
pub struct MultifractalSynthesizer {
    params: MultifractalParams,
}

impl MultifractalSynthesizer {
    /// Create a synthesizer for the given parameters.
    pub fn new(params: MultifractalParams) -> Self {
        Self { params }
    }

    /// Parameters this synthesizer was built with.
    pub fn params(&self) -> &MultifractalParams {
        &self.params
    }

    /// Produce a `width × depth` field of elevations in `[0, 255]`.
    pub fn synthesize(&self, width: u32, depth: u32) -> Result<Vec<f32>, TerrainError> {
        let len = validate_dimensions(width, depth)?;
        self.params.validate()?;

        let noise = NoiseField::new(self.params.seed);
        let octaves = self.params.clamped_octaves();
        let MultifractalParams {
            persistence,
            lacunarity,
            mode,
            ..
        } = self.params;

        let mut values = Vec::with_capacity(len);
        for z in 0..depth {
            for x in 0..width {
                let point = Vec2::new(x as f32, z as f32);
                values.push(accumulate(&noise, point, octaves, persistence, lacunarity, mode));
            }
        }

        normalize_and_reshape(&mut values, self.params.power_scale);
        Ok(values)
    }

    /// Synthesize at the field's current dimensions and swap the result in.
    pub fn generate(&self, field: &mut HeightField) -> Result<(), TerrainError> {
        if field.is_empty() {
            return Err(TerrainError::EmptyField);
        }
        let (width, depth) = (field.width(), field.depth());
        let elevations = self.synthesize(width, depth)?;
        field.update(elevations, width, depth)
    }
}

/// Sum `octaves` samples of `noise` at `point`, starting at
/// [`BASE_FREQUENCY`] with amplitude 1.
///
/// Shared by both synthesizers; plain fBm is `persistence = 0.5`,
/// `lacunarity = 2.0`, [`FractalMode::Fbm`].
pub(crate) fn accumulate(
    noise: &NoiseField,
    point: Vec2,
    octaves: i32,
    persistence: f32,
    lacunarity: f32,
    mode: FractalMode,
) -> f32 {
    let mut frequency = BASE_FREQUENCY;
    let mut amplitude = 1.0;
    let mut total = 0.0;

    for _ in 0..octaves {
        let sample = noise.sample(point * frequency);
        let contribution = match mode {
            FractalMode::Fbm => (sample + 1.0) * 0.5,
            FractalMode::Ridged => {
                let ridge = 1.0 - sample.abs();
                ridge * ridge
            }
        };
        total += amplitude * contribution;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total
}
