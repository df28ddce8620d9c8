//! Vertex and index buffer upload for sphere meshes.

use bytemuck::{Pod, Zeroable};
use orrery_mesh::SphereMesh;

/// Interleaved vertex format: position, normal, uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BodyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl BodyVertex {
    /// Vertex buffer layout for the body pipeline.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Interleave a sphere mesh into the GPU vertex format.
pub fn interleave_sphere(mesh: &SphereMesh) -> Vec<BodyVertex> {
    (0..mesh.positions.len())
        .map(|i| BodyVertex {
            position: mesh.positions[i].to_array(),
            normal: mesh.normals[i].to_array(),
            uv: mesh.uvs[i],
        })
        .collect()
}

/// GPU vertex/index buffers for one mesh, ready for indexed drawing.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Upload a sphere mesh into fresh vertex and index buffers.
    pub fn from_sphere(device: &wgpu::Device, label: &str, mesh: &SphereMesh) -> Self {
        use wgpu::util::DeviceExt;

        let vertices = interleave_sphere(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Bind vertex and index buffers to a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    /// Issue one indexed draw over the whole mesh.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_mesh::generate_uv_sphere;

    #[test]
    fn test_vertex_layout_stride_and_attributes() {
        let layout = BodyVertex::layout();
        // position (f32x3) + normal (f32x3) + uv (f32x2) = 32 bytes
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_interleave_preserves_counts_and_values() {
        let mesh = generate_uv_sphere(4, 4, 2.0).unwrap();
        let vertices = interleave_sphere(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());

        let last = vertices.len() - 1;
        assert_eq!(vertices[last].position, mesh.positions[last].to_array());
        assert_eq!(vertices[last].normal, mesh.normals[last].to_array());
        assert_eq!(vertices[last].uv, mesh.uvs[last]);
    }
}
