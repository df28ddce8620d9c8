//! GPU-side implementation of the scene's renderer capability.
//!
//! The draw traversal runs outside any render pass, so submits are recorded
//! first: [`GpuSceneRenderer`] pushes `(mesh, texture, mvp)` commands into
//! the [`SceneStore`], the store writes the per-body transform uniforms
//! before the pass begins, and `replay` plays the commands back inside it.

use glam::Mat4;
use orrery_mesh::SphereMesh;
use orrery_scene::{BodyRenderer, MeshHandle, TextureHandle};

use crate::buffer::MeshBuffer;
use crate::pipeline::{BodyPipeline, TransformUniform};
use crate::texture::TextureManager;

/// GPU resources for one body: its mesh plus a dedicated transform uniform.
struct GpuBody {
    mesh: MeshBuffer,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
}

/// One recorded draw for the current frame.
struct DrawCmd {
    mesh: MeshHandle,
    texture: TextureHandle,
    mvp: Mat4,
}

/// Owns every uploaded body mesh and the frame's recorded draw list.
#[derive(Default)]
pub struct SceneStore {
    bodies: Vec<GpuBody>,
    draws: Vec<DrawCmd>,
}

impl SceneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of uploaded body meshes.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of draws recorded for the current frame.
    pub fn recorded_draws(&self) -> usize {
        self.draws.len()
    }

    /// Write every recorded transform to its body's uniform buffer.
    ///
    /// Each body is drawn once per frame, so one uniform per body is enough;
    /// the writes land before the pass executes.
    pub fn flush(&self, queue: &wgpu::Queue) {
        for cmd in &self.draws {
            let uniform = TransformUniform {
                mvp: cmd.mvp.to_cols_array_2d(),
            };
            queue.write_buffer(
                &self.bodies[cmd.mesh.index()].transform_buffer,
                0,
                bytemuck::cast_slice(&[uniform]),
            );
        }
    }

    /// Play the recorded draws back into a render pass.
    pub fn replay<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        pipeline: &'a BodyPipeline,
        textures: &'a TextureManager,
    ) {
        render_pass.set_pipeline(&pipeline.pipeline);
        for cmd in &self.draws {
            let body = &self.bodies[cmd.mesh.index()];
            render_pass.set_bind_group(0, &body.transform_bind_group, &[]);
            render_pass.set_bind_group(1, &textures.get(cmd.texture).bind_group, &[]);
            body.mesh.bind(render_pass);
            body.mesh.draw(render_pass);
        }
    }

    /// Drop the recorded draw list; call after the frame is submitted.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

/// Borrowing adapter that lets the scene graph upload and submit through
/// the store. Created fresh wherever a `BodyRenderer` is needed.
pub struct GpuSceneRenderer<'a> {
    pub device: &'a wgpu::Device,
    pub pipeline: &'a BodyPipeline,
    pub store: &'a mut SceneStore,
}

impl BodyRenderer for GpuSceneRenderer<'_> {
    fn upload_sphere(&mut self, label: &str, mesh: &SphereMesh) -> MeshHandle {
        use wgpu::util::DeviceExt;

        let mesh_buffer = MeshBuffer::from_sphere(self.device, label, mesh);

        let transform_buffer =
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label}-transform")),
                    contents: bytemuck::cast_slice(&[TransformUniform {
                        mvp: Mat4::IDENTITY.to_cols_array_2d(),
                    }]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

        let transform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-transform-bind-group")),
            layout: &self.pipeline.transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let handle = MeshHandle::new(self.store.bodies.len() as u32);
        self.store.bodies.push(GpuBody {
            mesh: mesh_buffer,
            transform_buffer,
            transform_bind_group,
        });
        handle
    }

    fn submit(
        &mut self,
        mesh: MeshHandle,
        texture: TextureHandle,
        projection: Mat4,
        model_view: Mat4,
    ) {
        self.store.draws.push(DrawCmd {
            mesh,
            texture,
            mvp: projection * model_view,
        });
    }
}
