//! Fractal Brownian motion (fBm) heightmap synthesis.
//!
//! Octaves of [`NoiseField`] are summed with frequency doubling and
//! amplitude halving per octave, then the whole field is min/max normalized
//! and reshaped by a power curve into `[0, 255]`.

use glam::Vec2;

use crate::TerrainError;
use crate::height_field::{HeightField, min_max, validate_dimensions};
use crate::multifractal::{FractalMode, accumulate};
use crate::noise_field::NoiseField;

/// Fewest octaves a request is clamped to.
pub const MIN_OCTAVES: i32 = 1;
/// Most octaves a request is clamped to.
pub const MAX_OCTAVES: i32 = 8;
/// Sampling frequency of the first octave, in cycles per grid cell.
pub const BASE_FREQUENCY: f32 = 0.005;
/// Upper end of the normalized output range.
pub const OUTPUT_SCALE: f32 = 255.0;

/// Parameters for [`FractalSynthesizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Seed for the noise tables. Same seed, same field.
    pub seed: u64,
    /// Number of octaves. Silently clamped to
    /// [`MIN_OCTAVES`]`..=`[`MAX_OCTAVES`], negative counts included.
    pub octaves: i32,
    /// Reshape exponent applied after normalization; values above 1 deepen
    /// valleys, values below 1 flatten peaks. Must be finite and positive.
    pub power_scale: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            power_scale: 1.0,
        }
    }
}

impl FractalParams {
    /// Octave count after clamping into the supported range.
    pub fn clamped_octaves(&self) -> i32 {
        self.octaves.clamp(MIN_OCTAVES, MAX_OCTAVES)
    }
}

/// Generates full elevation fields with fixed-ratio fBm.
#[derive(Clone, Debug, Default)]
pub struct FractalSynthesizer {
    params: FractalParams,
}

impl FractalSynthesizer {
    /// Create a synthesizer for the given parameters.
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }

    /// Parameters this synthesizer was built with.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// Produce a `width × depth` field of elevations in `[0, 255]`.
    ///
    /// Noise tables are rebuilt from the seed on every call. A field with no
    /// variance at all comes out as all zeros.
    pub fn synthesize(&self, width: u32, depth: u32) -> Result<Vec<f32>, TerrainError> {
        let len = validate_dimensions(width, depth)?;
        validate_power_scale(self.params.power_scale)?;

        let noise = NoiseField::new(self.params.seed);
        let octaves = self.params.clamped_octaves();

        let mut values = Vec::with_capacity(len);
        for z in 0..depth {
            for x in 0..width {
                let point = Vec2::new(x as f32, z as f32);
                values.push(accumulate(&noise, point, octaves, 0.5, 2.0, FractalMode::Fbm));
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

pub(crate) fn validate_power_scale(power_scale: f32) -> Result<(), TerrainError> {
    if !power_scale.is_finite() || power_scale <= 0.0 {
        return Err(TerrainError::InvalidPowerScale(power_scale));
    }
    Ok(())
}

/// Remap every value to `((v - min) / (max - min))^power_scale * 255`.
///
/// A constant input (no range to normalize over) becomes all zeros.
pub(crate) fn normalize_and_reshape(values: &mut [f32], power_scale: f32) {
    let Some((min, max)) = min_max(values) else {
        return;
    };
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        tracing::debug!(min, max, "zero-variance field, flattening to 0");
        values.fill(0.0);
        return;
    }
    for v in values.iter_mut() {
        *v = ((*v - min) / range).powf(power_scale) * OUTPUT_SCALE;
    }
}
