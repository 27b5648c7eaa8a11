//! GPU lighting uniform and bind group management.
//!
//! Two directional lights plus one ambient term, the classic
//! viewer-friendly setup: a warm key light from the upper front, a white
//! fill from behind, and a faintly warm ambient floor.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;

/// Lighting configuration shared by the mesh shader.
/// NOTE: Must match the WGSL struct layout exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Primary light direction (normalized, pointing from the light).
    pub light1_dir: [f32; 3],
    /// Primary light intensity.
    pub light1_intensity: f32,
    /// Primary light color (linear RGB).
    pub light1_color: [f32; 3],
    pub(crate) _pad0: f32,
    /// Secondary light direction (normalized).
    pub light2_dir: [f32; 3],
    /// Secondary light intensity.
    pub light2_intensity: f32,
    /// Secondary light color (linear RGB).
    pub light2_color: [f32; 3],
    pub(crate) _pad1: f32,
    /// Ambient light color (linear RGB).
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    pub ambient_intensity: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            // Key light: warm pink-white from the upper front right
            light1_dir: normalize([1.0, 1.0, 1.0]),
            light1_intensity: 0.8,
            light1_color: [1.0, 0.933, 1.0],
            _pad0: 0.0,
            // Fill light: white from behind and slightly above
            light2_dir: normalize([-1.0, 0.5, -1.0]),
            light2_intensity: 0.8,
            light2_color: [1.0, 1.0, 1.0],
            _pad1: 0.0,
            // Ambient floor: warm yellow-white
            ambient_color: [1.0, 1.0, 0.933],
            ambient_intensity: 0.25,
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Owns the lighting uniform's GPU buffer and bind group (group 1).
pub struct LightingState {
    /// CPU-side mirror of the GPU uniform.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the lighting uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group binding the lighting uniform.
    pub bind_group: wgpu::BindGroup,
}

impl LightingState {
    /// Create the lighting state with default lights.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = LightingUniform::default();

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Lighting Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Push the current lighting values to the GPU.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
