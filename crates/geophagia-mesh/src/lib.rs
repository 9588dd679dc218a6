//! Height field tessellation: terrain vertex format, grid-to-mesh conversion
//! with analytic normals, and the upload seam to the renderer.

pub mod sink;
pub mod terrain_mesh;
pub mod tessellator;
pub mod vertex_format;

pub use sink::{MeshSink, NullSink, RecordingSink};
pub use terrain_mesh::{TerrainMesh, TerrainVertex};
pub use tessellator::{MeshTessellator, NORMAL_VERTICAL_SCALE, tessellate};
pub use vertex_format::{
    TERRAIN_VERTEX_ATTRIBUTES, TERRAIN_VERTEX_LAYOUT, terrain_vertex_buffer_layout,
};
