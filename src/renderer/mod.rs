//! Off-screen scene rendering.
//!
//! [`SceneRenderer`] owns the mesh pipeline and the readback target every
//! frame ends up in. A frame is either a single direct pass into the
//! readback target, or — when SSAA is enabled — a high-resolution scene
//! pass followed by the [`resolve::ResolvePass`] downsample.

/// SSAA resolve (downsample + gamma) pass.
pub mod resolve;

use crate::camera::rig::CameraRig;
use crate::gpu::render_context::{RenderContext, TARGET_FORMAT};
use crate::gpu::texture::{DepthTarget, RenderTarget};
use crate::renderer::resolve::ResolvePass;
use crate::scene::lighting::LightingState;
use crate::scene::mesh::Vertex;
use crate::scene::Scene;

/// Create the depth-tested mesh render pipeline.
fn create_mesh_pipeline(
    context: &RenderContext,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader =
        context
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Mesh Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("shaders/mesh.wgsl").into(),
                ),
            });

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTarget::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

/// Renders the scene off-screen, directly or through the SSAA resolve.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    readback: RenderTarget,
    depth: DepthTarget,
    resolve: Option<ResolvePass>,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Build the renderer and its native-resolution targets.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        clear_color: wgpu::Color,
    ) -> Self {
        let pipeline =
            create_mesh_pipeline(context, &[camera_layout, lighting_layout]);
        let readback = RenderTarget::new(
            &context.device,
            "Readback Target",
            context.width,
            context.height,
            TARGET_FORMAT,
        );
        let depth =
            DepthTarget::new(&context.device, context.width, context.height);

        Self {
            pipeline,
            readback,
            depth,
            resolve: None,
            clear_color,
        }
    }

    /// The texture holding the last rendered frame.
    #[must_use]
    pub fn readback_target(&self) -> &RenderTarget {
        &self.readback
    }

    /// Render one frame and submit it to the GPU queue.
    ///
    /// With `use_ssaa` false this is a single direct pass into the readback
    /// target; otherwise the scene is drawn at the context's render scale
    /// and resolved down with gamma correction. Rendering is synchronous
    /// per frame: the submit completes before any readback of the frame
    /// begins.
    pub fn render(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        camera: &CameraRig,
        lighting: &LightingState,
        use_ssaa: bool,
    ) {
        let mut encoder = context.create_encoder();

        if use_ssaa {
            if !self.resolve.as_ref().is_some_and(|r| r.matches(context)) {
                self.resolve = Some(ResolvePass::new(context));
            }
            // Rebuilt above whenever stale, so this always holds a pass.
            if let Some(resolve) = self.resolve.as_ref() {
                self.scene_pass(
                    &mut encoder,
                    scene,
                    camera,
                    lighting,
                    &resolve.input.view,
                    &resolve.depth.view,
                );
                resolve.render(&mut encoder, &self.readback.view);
            }
        } else {
            let (view, depth_view) = (&self.readback.view, &self.depth.view);
            self.scene_pass(
                &mut encoder,
                scene,
                camera,
                lighting,
                view,
                depth_view,
            );
        }

        context.submit(encoder);
        log::debug!(
            "rendered frame: {} meshes, ssaa={use_ssaa}",
            scene.len()
        );
    }

    fn scene_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &Scene,
        camera: &CameraRig,
        lighting: &LightingState,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &camera.bind_group, &[]);
        pass.set_bind_group(1, &lighting.bind_group, &[]);
        for mesh in scene.meshes() {
            mesh.draw(&mut pass);
        }
    }
}
