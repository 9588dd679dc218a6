//! The seam between tessellation and whatever owns the GPU buffers.

use crate::terrain_mesh::{TerrainMesh, TerrainVertex};

/// Receives a freshly built mesh for upload.
///
/// The renderer implements this over its vertex/index buffers; it is called
/// once per rebuild with the complete buffers, replacing whatever was
/// uploaded before.
pub trait MeshSink {
    /// Replace the uploaded geometry.
    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]);
}

/// A sink that discards everything, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MeshSink for NullSink {
    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) {
        tracing::trace!(
            vertices = vertices.len(),
            indices = indices.len(),
            "mesh upload discarded"
        );
    }
}

/// A sink that keeps a copy of the last upload and counts uploads.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Copy of the most recent upload.
    pub last: TerrainMesh,
    /// Number of uploads received.
    pub uploads: usize,
}

impl MeshSink for RecordingSink {
    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) {
        self.last.vertices.clear();
        self.last.vertices.extend_from_slice(vertices);
        self.last.indices.clear();
        self.last.indices.extend_from_slice(indices);
        self.uploads += 1;
    }
}

impl<S: MeshSink + ?Sized> MeshSink for Box<S> {
    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) {
        (**self).upload(vertices, indices);
    }
}
