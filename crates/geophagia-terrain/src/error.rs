//! Terrain error types.

/// Errors produced by height field validation, synthesis, and persistence.
///
/// Every operation that returns one of these leaves the target
/// [`HeightField`](crate::HeightField) exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Width or depth was zero.
    #[error("height field dimensions must be greater than 0 (got {width}x{depth})")]
    ZeroDimension { width: u32, depth: u32 },

    /// The grid has more samples than can be addressed or allocated.
    #[error("height field of {width}x{depth} samples is too large to allocate")]
    TooLarge { width: u32, depth: u32 },

    /// The elevation buffer does not hold `width * depth` samples.
    #[error("expected {expected} elevations for a {width}x{depth} field, got {actual}")]
    SizeMismatch {
        width: u32,
        depth: u32,
        expected: u64,
        actual: usize,
    },

    /// The operation needs a non-empty field to work on.
    #[error("height field is empty")]
    EmptyField,

    /// A raw heightmap shorter than its header plus one sample.
    #[error("raw heightmap is too short ({len} bytes)")]
    RawTooShort { len: usize },

    /// The raw payload is not a whole number of `f32` samples.
    #[error("raw heightmap payload of {payload} bytes is not a multiple of 4")]
    RawMisaligned { payload: usize },

    /// The raw header dimensions disagree with the payload size.
    #[error("raw heightmap header says {width}x{depth} but the payload holds {payload} bytes")]
    RawDimensionMismatch {
        width: u32,
        depth: u32,
        payload: usize,
    },

    /// The reshape exponent was not a finite positive number.
    #[error("power scale must be finite and greater than 0 (got {0})")]
    InvalidPowerScale(f32),

    /// Octave amplitude falloff was not a finite positive number.
    #[error("persistence must be finite and greater than 0 (got {0})")]
    InvalidPersistence(f32),

    /// Octave frequency growth was not a finite positive number.
    #[error("lacunarity must be finite and greater than 0 (got {0})")]
    InvalidLacunarity(f32),

    /// Voronoi synthesis was asked for fewer than one centroid.
    #[error("not enough centroids to generate a voronoi heightmap (got {0})")]
    NotEnoughCentroids(i32),

    /// Reading or writing a heightmap file failed.
    #[error("heightmap I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image heightmap failed.
    #[error("heightmap image error: {0}")]
    Image(#[from] image::ImageError),
}

impl TerrainError {
    /// Returns `true` for degenerate requests that are reported and ignored
    /// rather than treated as failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NotEnoughCentroids(_))
    }
}
