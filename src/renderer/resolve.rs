//! SSAA resolve pass — supersample downsampling plus gamma correction.
//!
//! The scene is rendered at `render_scale`× the output resolution into this
//! pass's input target; the resolve shader box-averages each scale×scale
//! texel block and gamma-encodes the result into the readback target. This
//! stands in for the original's supersampling + gamma-correction
//! post-process chain.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::{RenderContext, TARGET_FORMAT};
use crate::gpu::texture::{DepthTarget, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ResolveParams {
    scale: u32,
    _pad: [u32; 3],
}

/// Owns the high-resolution scene target and the downsample pipeline.
pub struct ResolvePass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    /// High-resolution color target the scene pass renders into.
    pub input: RenderTarget,
    /// Depth attachment matching the high-resolution target.
    pub depth: DepthTarget,
    /// Supersampling scale factor this pass was built for.
    pub scale: u32,
}

impl ResolvePass {
    /// Create the resolve pass for the context's current render scale.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let scale = context.render_scale.max(1);
        let width = context.render_width();
        let height = context.render_height();

        let input = RenderTarget::new(
            &context.device,
            "SSAA Scene Target",
            width,
            height,
            TARGET_FORMAT,
        );
        let depth = DepthTarget::new(&context.device, width, height);

        let params = ResolveParams {
            scale,
            _pad: [0; 3],
        };
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Resolve Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Resolve Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::uniform_buffer(
                        1,
                        wgpu::ShaderStages::FRAGMENT,
                    ),
                ],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Resolve Bind Group"),
                    layout: &bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &input.view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: params_buffer.as_entire_binding(),
                        },
                    ],
                });

        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Resolve Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("shaders/resolve.wgsl").into(),
                ),
            },
        );

        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            &context.device,
            "Resolve",
            &shader,
            TARGET_FORMAT,
            &[&bind_group_layout],
        );

        Self {
            pipeline,
            bind_group,
            input,
            depth,
            scale,
        }
    }

    /// Whether this pass still matches the context's scale and dimensions.
    #[must_use]
    pub fn matches(&self, context: &RenderContext) -> bool {
        self.scale == context.render_scale
            && self.input.width == context.render_width()
            && self.input.height == context.render_height()
    }

    /// Record the downsample + gamma pass into `output_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Resolve Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
