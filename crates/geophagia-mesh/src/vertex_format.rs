//! The `wgpu::VertexBufferLayout` matching [`TerrainVertex`].
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv       |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::terrain_mesh::TerrainVertex;

/// Vertex attributes for the terrain mesh.
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// Buffer layout for the terrain render pipeline, one [`TerrainVertex`] per vertex.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

/// [`TERRAIN_VERTEX_LAYOUT`] as an owned value.
pub fn terrain_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TERRAIN_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<TerrainVertex>() == 32,
    "TerrainVertex size changed, update TERRAIN_VERTEX_LAYOUT"
);
const _: () = assert!(mem::offset_of!(TerrainVertex, position) == 0);
const _: () = assert!(mem::offset_of!(TerrainVertex, normal) == 12);
const _: () = assert!(mem::offset_of!(TerrainVertex, uv) == 24);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(TERRAIN_VERTEX_LAYOUT.array_stride, 32);
        assert_eq!(
            TERRAIN_VERTEX_LAYOUT.array_stride,
            mem::size_of::<TerrainVertex>() as u64
        );
    }

    #[test]
    fn test_attributes_cover_the_whole_vertex() {
        let stride = TERRAIN_VERTEX_LAYOUT.array_stride;
        let mut end = 0;
        for (i, attr) in TERRAIN_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
            assert_eq!(attr.offset, end, "Attribute {i} leaves a gap");
            end = attr.offset + attr.format.size();
        }
        assert_eq!(end, stride, "Attributes must fill the stride exactly");
    }

    #[test]
    fn test_attribute_formats() {
        assert_eq!(TERRAIN_VERTEX_ATTRIBUTES[0].format, VertexFormat::Float32x3);
        assert_eq!(TERRAIN_VERTEX_ATTRIBUTES[1].format, VertexFormat::Float32x3);
        assert_eq!(TERRAIN_VERTEX_ATTRIBUTES[2].format, VertexFormat::Float32x2);
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = terrain_vertex_buffer_layout();
        assert_eq!(layout.array_stride, TERRAIN_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.step_mode, VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_layout_is_valid_for_wgpu_pipeline() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            force_fallback_adapter: true,
            ..Default::default()
        }));

        let Ok(adapter) = adapter else {
            // No adapter on headless CI.
            return;
        };

        let (device, _queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .expect("failed to create device");

        let shader_source = r#"
            struct VertexOut {
                @builtin(position) clip: vec4<f32>,
                @location(0) normal: vec3<f32>,
                @location(1) uv: vec2<f32>,
            };

            @vertex
            fn vs_main(
                @location(0) position: vec3<f32>,
                @location(1) normal: vec3<f32>,
                @location(2) uv: vec2<f32>,
            ) -> VertexOut {
                var out: VertexOut;
                out.clip = vec4<f32>(position, 1.0);
                out.normal = normal;
                out.uv = uv;
                return out;
            }

            @fragment
            fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
                return vec4<f32>(in.normal * 0.5 + 0.5, 1.0);
            }
        "#;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("test_terrain_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let _pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("test_terrain_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TERRAIN_VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });
    }
}
