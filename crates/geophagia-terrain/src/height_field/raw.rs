//! Raw binary heightmap format.
//!
//! | Offset | Type                        | Field                         |
//! |--------|-----------------------------|-------------------------------|
//! | 0      | `u32` LE                    | width                         |
//! | 4      | `u32` LE                    | depth                         |
//! | 8      | `width * depth` × `f32` LE  | elevations, `z` outer `x` inner |

use std::path::Path;

use super::HeightField;
use crate::TerrainError;

/// Size of the `width` + `depth` header in bytes.
pub const RAW_HEADER_LEN: usize = 2 * size_of::<u32>();

const SAMPLE_LEN: usize = size_of::<f32>();

/// Parse a raw heightmap into `(width, depth, elevations)`.
///
/// A header whose dimensions disagree with the payload length is rejected
/// outright; nothing is read past a mismatch.
pub fn decode_raw(bytes: &[u8]) -> Result<(u32, u32, Vec<f32>), TerrainError> {
    if bytes.len() <= RAW_HEADER_LEN {
        return Err(TerrainError::RawTooShort { len: bytes.len() });
    }

    let (header, payload) = bytes.split_at(RAW_HEADER_LEN);
    if payload.len() % SAMPLE_LEN != 0 {
        return Err(TerrainError::RawMisaligned {
            payload: payload.len(),
        });
    }

    let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let depth = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if width == 0 || depth == 0 {
        return Err(TerrainError::ZeroDimension { width, depth });
    }

    if width as u64 * depth as u64 * SAMPLE_LEN as u64 != payload.len() as u64 {
        return Err(TerrainError::RawDimensionMismatch {
            width,
            depth,
            payload: payload.len(),
        });
    }

    let elevations = payload
        .chunks_exact(SAMPLE_LEN)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok((width, depth, elevations))
}

impl HeightField {
    /// Encode the field in the raw binary layout.
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RAW_HEADER_LEN + self.len() * SAMPLE_LEN);
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.depth.to_le_bytes());
        for &h in &self.elevations {
            bytes.extend_from_slice(&h.to_le_bytes());
        }
        bytes
    }

    /// Replace the field with a decoded raw heightmap.
    pub fn load_raw(&mut self, bytes: &[u8]) -> Result<(), TerrainError> {
        let (width, depth, elevations) = decode_raw(bytes)?;
        self.update(elevations, width, depth)
    }

    /// Read and decode a raw heightmap file.
    pub fn load_raw_file(&mut self, path: &Path) -> Result<(), TerrainError> {
        let bytes = std::fs::read(path)?;
        self.load_raw(&bytes)
    }

    /// Write the field to `path` in the raw binary layout.
    ///
    /// An empty field has no valid raw encoding and is refused.
    pub fn save_raw_file(&self, path: &Path) -> Result<(), TerrainError> {
        if self.is_empty() {
            return Err(TerrainError::EmptyField);
        }

        std::fs::write(path, self.to_raw_bytes())?;
        Ok(())
    }
}
