//! Procedural heightmap synthesis: seeded gradient noise, fractal and cellular
//! generators, and the canonical height field they write into.

mod error;
mod fractal;
mod generator;
mod height_field;
mod multifractal;
mod noise_field;
mod voronoi;

pub use error::TerrainError;
pub use fractal::{
    BASE_FREQUENCY, FractalParams, FractalSynthesizer, MAX_OCTAVES, MIN_OCTAVES, OUTPUT_SCALE,
};
pub use generator::HeightmapGenerator;
pub use height_field::{HeightField, RAW_HEADER_LEN, decode_raw, elevation_to_byte};
pub use multifractal::{FractalMode, MultifractalParams, MultifractalSynthesizer};
pub use noise_field::{NoiseField, TABLE_SIZE};
pub use voronoi::{CENTROID_ELEVATION_RANGE, Centroid, VoronoiParams, VoronoiSynthesizer};
