//! Terrain mesh data: interleaved vertices plus a triangle index buffer.

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;

/// A single terrain vertex, laid out exactly as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Grid position centred on the origin in X/Z, elevation in Y.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates, scaled by the tessellator's texture scale.
    pub uv: [f32; 2],
}

assert_eq_size!(TerrainVertex, [f32; 8]);

/// The output of tessellating a height field.
///
/// The vertex for grid cell `(x, z)` sits at index `z * width + x`; the index
/// buffer holds two triangles per grid quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    /// Vertex buffer.
    pub vertices: Vec<TerrainVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = TerrainMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.vertex_bytes().is_empty());
    }

    #[test]
    fn test_byte_views_match_lengths() {
        let mesh = TerrainMesh {
            vertices: vec![TerrainVertex::default(); 3],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_bytes().len(), 3 * 32);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_vertex_is_interleaved_in_field_order() {
        let vertex = TerrainVertex {
            position: [1.0, 2.0, 3.0],
            normal: [4.0, 5.0, 6.0],
            uv: [7.0, 8.0],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
