//! Cellular (Voronoi) heightmap synthesis.
//!
//! Random centroids each carry an elevation; every grid cell takes the
//! elevation of its nearest centroid, producing flat stepped plateaus.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::TerrainError;
use crate::height_field::{HeightField, validate_dimensions};

/// Exclusive upper bound of a centroid's elevation; the lower bound is 0.
pub const CENTROID_ELEVATION_RANGE: f32 = 256.0;

/// Parameters for [`VoronoiSynthesizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoronoiParams {
    /// Seed for centroid placement and elevations.
    pub seed: u64,
    /// Number of centroids. Anything below one is a degenerate request.
    pub centroids: i32,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            seed: 0,
            centroids: 15,
        }
    }
}

/// A seed point owning the region of cells nearest to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    /// Position in grid space, inside `[0, width) × [0, depth)`.
    pub position: Vec2,
    /// Elevation in `[0, 256)` given to every cell in the region.
    pub elevation: f32,
}

/// Brute-force nearest-centroid plateau generator.
///
/// Cost is `width * depth * centroids` distance evaluations, which is fine
/// at editor grid sizes.
#[derive(Clone, Debug, Default)]
pub struct VoronoiSynthesizer {
    params: VoronoiParams,
}

impl VoronoiSynthesizer {
    /// Create a synthesizer for the given parameters.
    pub fn new(params: VoronoiParams) -> Self {
        Self { params }
    }

    /// Parameters this synthesizer was built with.
    pub fn params(&self) -> &VoronoiParams {
        &self.params
    }

    /// Scatter the centroids for a `width × depth` field.
    ///
    /// Each centroid draws `x`, then `z`, then its elevation from one
    /// seeded stream, so the set is fully determined by the seed and the
    /// field dimensions. A zero-sized field gets no centroids.
    pub fn scatter_centroids(&self, width: u32, depth: u32) -> Vec<Centroid> {
        if width == 0 || depth == 0 {
            return Vec::new();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        (0..self.params.centroids.max(0))
            .map(|_| {
                let x = rng.random_range(0.0..width as f32);
                let z = rng.random_range(0.0..depth as f32);
                let elevation = rng.random_range(0.0..CENTROID_ELEVATION_RANGE);
                Centroid {
                    position: Vec2::new(x, z),
                    elevation,
                }
            })
            .collect()
    }

    /// Produce a `width × depth` field of plateau elevations.
    ///
    /// Fails with [`TerrainError::NotEnoughCentroids`] (a warning, see
    /// [`TerrainError::is_warning`]) when asked for no centroids.
    pub fn synthesize(&self, width: u32, depth: u32) -> Result<Vec<f32>, TerrainError> {
        if self.params.centroids < 1 {
            return Err(TerrainError::NotEnoughCentroids(self.params.centroids));
        }
        let len = validate_dimensions(width, depth)?;

        let centroids = self.scatter_centroids(width, depth);
        let mut values = Vec::with_capacity(len);
        for z in 0..depth {
            for x in 0..width {
                let cell = Vec2::new(x as f32, z as f32);
                values.push(nearest(&centroids, cell).elevation);
            }
        }
        Ok(values)
    }

    /// Synthesize at the field's current dimensions and swap the result in.
    pub fn generate(&self, field: &mut HeightField) -> Result<(), TerrainError> {
        if self.params.centroids < 1 {
            return Err(TerrainError::NotEnoughCentroids(self.params.centroids));
        }
        if field.is_empty() {
            return Err(TerrainError::EmptyField);
        }
        let (width, depth) = (field.width(), field.depth());
        let elevations = self.synthesize(width, depth)?;
        field.update(elevations, width, depth)
    }
}

/// Nearest centroid by Euclidean distance. Ties go to the lower index.
///
/// `centroids` must not be empty.
fn nearest(centroids: &[Centroid], cell: Vec2) -> &Centroid {
    let mut best = &centroids[0];
    let mut best_distance = cell.distance(best.position);
    for candidate in &centroids[1..] {
        let distance = cell.distance(candidate.position);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}
