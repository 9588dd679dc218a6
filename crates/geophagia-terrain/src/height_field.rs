//! The canonical elevation grid edited by the application.
//!
//! A [`HeightField`] is a `width × depth` grid of `f32` samples stored
//! row-major (`z` outer, `x` inner). Elevations are bare "height units": no
//! range is imposed here, generators and loaders decide what they write.

mod image;
mod raw;

pub use self::image::elevation_to_byte;
pub use raw::{RAW_HEADER_LEN, decode_raw};

use crate::TerrainError;

/// Width × depth grid of elevation samples.
///
/// `elevations.len() == width * depth` holds at all times. The only way to
/// replace the grid is [`update`](Self::update), which validates the new
/// size before swapping and leaves the field untouched on failure.
#[derive(Clone, Debug, Default)]
pub struct HeightField {
    width: u32,
    depth: u32,
    elevations: Vec<f32>,
    revision: u64,
}

impl HeightField {
    /// The 0×0 field an editor session starts with before anything is loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A flat field with every sample at zero.
    ///
    /// The buffer is reserved fallibly, so an oversized request comes back
    /// as [`TerrainError::TooLarge`] instead of aborting.
    pub fn flat(width: u32, depth: u32) -> Result<Self, TerrainError> {
        let len = validate_dimensions(width, depth)?;
        let mut elevations = Vec::new();
        elevations
            .try_reserve_exact(len)
            .map_err(|_| TerrainError::TooLarge { width, depth })?;
        elevations.resize(len, 0.0);
        Ok(Self {
            width,
            depth,
            elevations,
            revision: 0,
        })
    }

    /// A checkerboard preview field alternating `low` and `high` in square
    /// cells of `cell` samples. A `cell` of zero is treated as one.
    pub fn checkerboard(
        width: u32,
        depth: u32,
        cell: u32,
        low: f32,
        high: f32,
    ) -> Result<Self, TerrainError> {
        validate_dimensions(width, depth)?;
        let cell = cell.max(1);
        let elevations = (0..depth)
            .flat_map(|z| {
                (0..width).map(move |x| {
                    if ((x / cell) + (z / cell)) % 2 == 0 {
                        low
                    } else {
                        high
                    }
                })
            })
            .collect();
        Ok(Self {
            width,
            depth,
            elevations,
            revision: 0,
        })
    }

    /// Wrap an existing elevation buffer after validating its size.
    pub fn from_elevations(
        width: u32,
        depth: u32,
        elevations: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        validate_elevations(width, depth, &elevations)?;
        Ok(Self {
            width,
            depth,
            elevations,
            revision: 0,
        })
    }

    /// Atomically replace the grid.
    ///
    /// Fails with [`TerrainError::ZeroDimension`] or
    /// [`TerrainError::SizeMismatch`] without touching the current contents.
    /// On success the [`revision`](Self::revision) counter advances so that
    /// whoever owns the derived mesh knows to rebuild it.
    pub fn update(
        &mut self,
        elevations: Vec<f32>,
        width: u32,
        depth: u32,
    ) -> Result<(), TerrainError> {
        validate_elevations(width, depth, &elevations)?;
        self.width = width;
        self.depth = depth;
        self.elevations = elevations;
        self.revision = self.revision.wrapping_add(1);
        tracing::debug!(width, depth, revision = self.revision, "height field updated");
        Ok(())
    }

    /// Number of samples along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of samples along Z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// Returns `true` for the 0×0 field.
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Row-major samples, `z * width + x`.
    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    /// Consume the field, keeping only its samples.
    pub fn into_elevations(self) -> Vec<f32> {
        self.elevations
    }

    /// Number of successful updates applied to this field.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sample at `(x, z)`, or `None` outside the grid.
    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x >= self.width || z >= self.depth {
            return None;
        }
        self.elevations
            .get(z as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Sample at `(x, z)` with both coordinates clamped into the grid, so
    /// lookups past an edge repeat the border sample.
    ///
    /// Returns `0.0` on an empty field.
    pub fn height_clamped(&self, x: i64, z: i64) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let z = z.clamp(0, self.depth as i64 - 1) as usize;
        self.elevations[z * self.width as usize + x]
    }

    /// Smallest and largest sample, or `None` on an empty field.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        min_max(&self.elevations)
    }
}

/// Smallest and largest value of a slice.
pub(crate) fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let (&first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Check that a `width × depth` grid is non-empty and addressable, returning
/// its sample count.
pub(crate) fn validate_dimensions(width: u32, depth: u32) -> Result<usize, TerrainError> {
    if width == 0 || depth == 0 {
        return Err(TerrainError::ZeroDimension { width, depth });
    }
    (width as usize)
        .checked_mul(depth as usize)
        .ok_or(TerrainError::TooLarge { width, depth })
}

fn validate_elevations(width: u32, depth: u32, elevations: &[f32]) -> Result<(), TerrainError> {
    validate_dimensions(width, depth)?;
    let expected = width as u64 * depth as u64;
    if elevations.len() as u64 != expected {
        return Err(TerrainError::SizeMismatch {
            width,
            depth,
            expected,
            actual: elevations.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field() {
        let field = HeightField::empty();
        assert_eq!(field.width(), 0);
        assert_eq!(field.depth(), 0);
        assert!(field.is_empty());
        assert_eq!(field.min_max(), None);
        assert_eq!(field.height_clamped(3, -2), 0.0);
    }

    #[test]
    fn test_flat_field_is_zero() {
        let field = HeightField::flat(4, 3).unwrap();
        assert_eq!(field.len(), 12);
        assert!(field.elevations().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_flat_rejects_zero_dimension() {
        assert!(matches!(
            HeightField::flat(0, 5),
            Err(TerrainError::ZeroDimension { width: 0, depth: 5 })
        ));
    }

    #[test]
    fn test_flat_oversized_is_error_not_abort() {
        assert!(matches!(
            HeightField::flat(u32::MAX, u32::MAX),
            Err(TerrainError::TooLarge {
                width: u32::MAX,
                depth: u32::MAX
            })
        ));
    }

    #[test]
    fn test_checkerboard_alternates_cells() {
        let field = HeightField::checkerboard(4, 4, 2, 0.0, 10.0).unwrap();
        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(1, 1), Some(0.0));
        assert_eq!(field.get(2, 0), Some(10.0));
        assert_eq!(field.get(0, 2), Some(10.0));
        assert_eq!(field.get(3, 3), Some(0.0));
    }

    #[test]
    fn test_update_replaces_grid_and_bumps_revision() {
        let mut field = HeightField::flat(2, 2).unwrap();
        field.update(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.depth(), 2);
        assert_eq!(field.get(2, 1), Some(6.0));
        assert_eq!(field.revision(), 1);
    }

    #[test]
    fn test_update_rejects_size_mismatch_and_keeps_state() {
        let mut field = HeightField::from_elevations(2, 1, vec![7.0, 8.0]).unwrap();
        let err = field.update(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::SizeMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
        assert_eq!(field.width(), 2);
        assert_eq!(field.depth(), 1);
        assert_eq!(field.elevations(), &[7.0, 8.0]);
        assert_eq!(field.revision(), 0);
    }

    #[test]
    fn test_update_rejects_zero_dimension() {
        let mut field = HeightField::flat(2, 2).unwrap();
        assert!(matches!(
            field.update(Vec::new(), 0, 0),
            Err(TerrainError::ZeroDimension { .. })
        ));
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let field = HeightField::flat(3, 3).unwrap();
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 3), None);
    }

    #[test]
    fn test_height_clamped_replicates_border() {
        let field =
            HeightField::from_elevations(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(field.height_clamped(-1, 0), 1.0);
        assert_eq!(field.height_clamped(5, 0), 3.0);
        assert_eq!(field.height_clamped(1, -7), 2.0);
        assert_eq!(field.height_clamped(1, 9), 5.0);
        assert_eq!(field.height_clamped(-1, 9), 4.0);
    }

    #[test]
    fn test_min_max() {
        let field = HeightField::from_elevations(2, 2, vec![3.0, -1.5, 8.25, 0.0]).unwrap();
        assert_eq!(field.min_max(), Some((-1.5, 8.25)));
    }
}
