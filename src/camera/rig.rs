//! Camera GPU buffer and bind group ownership.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;

/// Owns a [`Camera`] together with its GPU uniform buffer and bind group.
///
/// The rig is the mutable camera state the framing operation works on; after
/// any change to the camera, [`CameraRig::update_gpu`] pushes the new
/// view-projection to the GPU.
pub struct CameraRig {
    /// The camera being driven.
    pub camera: Camera,
    /// CPU-side mirror of the GPU uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform (group 0).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group binding the camera uniform.
    pub bind_group: wgpu::BindGroup,
}

impl CameraRig {
    /// Create a rig with the given projection parameters, aimed down the
    /// negative depth axis from a unit distance until framed.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        fovy: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: context.aspect(),
            fovy,
            znear,
            zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Push the camera's current state to the GPU uniform buffer.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
