//! Height field to triangle mesh conversion.
//!
//! Every grid sample becomes one vertex. Normals come from central
//! differences over border-clamped neighbours, and each grid quad is split
//! along its bottom-left/top-right diagonal.

use std::time::Instant;

use geophagia_terrain::HeightField;
use glam::Vec3;

use crate::terrain_mesh::{TerrainMesh, TerrainVertex};

/// Vertical term of the unnormalized normal `(hL - hR, 2, hU - hD)`.
///
/// Ties the unit X/Z grid spacing to height units; changing it changes how
/// steep every slope is shaded.
pub const NORMAL_VERTICAL_SCALE: f32 = 2.0;

/// Builds terrain meshes from height fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTessellator {
    /// Number of texture repeats across the whole field.
    pub texture_scale: f32,
}

impl Default for MeshTessellator {
    fn default() -> Self {
        Self { texture_scale: 1.0 }
    }
}

impl MeshTessellator {
    /// Create a tessellator with the given texture scale.
    pub fn new(texture_scale: f32) -> Self {
        Self { texture_scale }
    }

    /// Tessellate `field` into a fresh mesh. See [`tessellate`].
    pub fn rebuild(&self, field: &HeightField) -> TerrainMesh {
        tessellate(field, self.texture_scale)
    }
}

/// Convert a height field into vertices and a winding-consistent index
/// buffer.
///
/// - position: `(x - width/2, h(x, z), z - depth/2)`
/// - normal: `normalize(hL - hR, 2, hU - hD)` with neighbours clamped to the grid
/// - uv: `texture_scale * (x / width, z / depth)`
///
/// For each quad with corners `bl = (x, z)`, `br = (x+1, z)`, `tl = (x, z+1)`,
/// `tr = (x+1, z+1)` the triangles are `(bl, tr, tl)` and `(br, tr, bl)`.
///
/// An empty field produces an empty mesh.
pub fn tessellate(field: &HeightField, texture_scale: f32) -> TerrainMesh {
    if field.is_empty() {
        return TerrainMesh::new();
    }

    let start = Instant::now();
    let width = field.width();
    let depth = field.depth();
    let half_width = width as f32 / 2.0;
    let half_depth = depth as f32 / 2.0;

    let mut vertices = Vec::with_capacity(field.len());
    for z in 0..depth {
        for x in 0..width {
            let (xi, zi) = (x as i64, z as i64);
            let h = field.height_clamped(xi, zi);

            let h_left = field.height_clamped(xi - 1, zi);
            let h_right = field.height_clamped(xi + 1, zi);
            let h_up = field.height_clamped(xi, zi - 1);
            let h_down = field.height_clamped(xi, zi + 1);
            let normal =
                Vec3::new(h_left - h_right, NORMAL_VERTICAL_SCALE, h_up - h_down).normalize();

            vertices.push(TerrainVertex {
                position: [x as f32 - half_width, h, z as f32 - half_depth],
                normal: normal.to_array(),
                uv: [
                    texture_scale * (x as f32 / width as f32),
                    texture_scale * (z as f32 / depth as f32),
                ],
            });
        }
    }

    let quads = (width as usize - 1) * (depth as usize - 1);
    let mut indices = Vec::with_capacity(quads * 6);
    for z in 0..depth - 1 {
        for x in 0..width - 1 {
            let bottom_left = z * width + x;
            let bottom_right = bottom_left + 1;
            let top_left = (z + 1) * width + x;
            let top_right = top_left + 1;

            indices.extend_from_slice(&[
                bottom_left,
                top_right,
                top_left,
                bottom_right,
                top_right,
                bottom_left,
            ]);
        }
    }

    tracing::debug!(
        vertices = vertices.len(),
        triangles = indices.len() / 3,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "terrain tessellated"
    );

    TerrainMesh { vertices, indices }
}
