//! Headless engine: context, scene, camera, lighting, and capture wiring.

use std::path::Path;

use glam::Vec3;

use crate::camera::encoded::decode_camera_string;
use crate::camera::framing::{
    fit_camera_to_bounds, validate_projection, Aabb, FramingMode,
};
use crate::camera::rig::CameraRig;
use crate::capture::{read_target_pixels, PixelData};
use crate::error::VantageError;
use crate::gpu::render_context::RenderContext;
use crate::options::RenderOptions;
use crate::renderer::SceneRenderer;
use crate::scene::lighting::LightingState;
use crate::scene::mesh::MeshData;
use crate::scene::Scene;

/// Owns everything needed to render a scene off-screen and capture it:
/// the GPU context, scene contents, camera rig, lighting, and renderer.
///
/// This is the crate's equivalent of a window-and-DOM viewer bootstrap,
/// with the global environment replaced by explicit objects.
pub struct HeadlessEngine {
    context: RenderContext,
    scene: Scene,
    camera: CameraRig,
    lighting: LightingState,
    renderer: SceneRenderer,
    options: RenderOptions,
}

impl HeadlessEngine {
    /// Create a headless engine with the given options, blocking on GPU
    /// adapter and device acquisition.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::InvalidParameter`] for out-of-range camera
    /// projection settings and [`VantageError::Gpu`] when no usable adapter
    /// or device exists. Context failure is fatal; there is no retry.
    pub fn new(options: RenderOptions) -> Result<Self, VantageError> {
        let width = options.viewport.width;
        let height = options.viewport.height;
        validate_projection(
            options.camera.fovy,
            width as f32 / height as f32,
        )?;

        let mut context =
            pollster::block_on(RenderContext::headless(width, height))?;
        context.render_scale = if options.ssaa.enabled {
            options.ssaa.scale.max(1)
        } else {
            1
        };

        let camera = CameraRig::new(
            &context,
            options.camera.fovy,
            options.camera.znear,
            options.camera.zfar,
        );
        let lighting = LightingState::new(&context);
        let renderer = SceneRenderer::new(
            &context,
            &camera.layout,
            &lighting.layout,
            options.wgpu_clear_color(),
        );

        log::info!("headless engine ready: {width}x{height}");

        Ok(Self {
            context,
            scene: Scene::new(),
            camera,
            lighting,
            renderer,
            options,
        })
    }

    /// Upload a mesh and add it to the scene.
    pub fn add_mesh(&mut self, mesh: &MeshData) {
        self.scene.add_mesh(&self.context, mesh);
    }

    /// Union bounding box of the scene's meshes, if any.
    #[must_use]
    pub fn scene_bounds(&self) -> Option<Aabb> {
        self.scene.bounds()
    }

    /// Immutable access to the camera rig.
    #[must_use]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Position the camera so the whole scene fits the viewport.
    ///
    /// Validates the projection first and errors on an empty scene; the
    /// framing math itself never fails.
    pub fn frame_scene(
        &mut self,
        mode: FramingMode,
    ) -> Result<(), VantageError> {
        validate_projection(self.camera.camera.fovy, self.camera.camera.aspect)?;
        let bounds = self.scene.bounds().ok_or(VantageError::EmptyScene)?;
        fit_camera_to_bounds(&bounds, &mut self.camera.camera, mode);
        self.camera.update_gpu(&self.context.queue);
        log::debug!(
            "framed scene {mode:?}: eye {:?}",
            self.camera.camera.eye
        );
        Ok(())
    }

    /// Place the camera from an encoded camera string: eye x,y,z followed
    /// by target x,y,z, with missing trailing fields zero-filled.
    pub fn apply_camera_string(
        &mut self,
        encoded: &str,
    ) -> Result<(), VantageError> {
        let fields = decode_camera_string(encoded)?;
        self.camera.camera.eye = Vec3::new(fields[0], fields[1], fields[2]);
        self.camera.camera.target =
            Vec3::new(fields[3], fields[4], fields[5]);
        self.camera.update_gpu(&self.context.queue);
        Ok(())
    }

    /// Render one frame into the readback target, honoring the SSAA
    /// options.
    pub fn render(&mut self) {
        self.lighting.update_gpu(&self.context.queue);
        self.renderer.render(
            &self.context,
            &self.scene,
            &self.camera,
            &self.lighting,
            self.options.ssaa.enabled,
        );
    }

    /// Read back the last rendered frame as tightly packed RGBA pixels.
    pub fn read_pixels(&self) -> Result<PixelData, VantageError> {
        read_target_pixels(&self.context, self.renderer.readback_target())
    }

    /// Capture the last rendered frame as an in-memory PNG.
    pub fn screenshot_png(&self) -> Result<Vec<u8>, VantageError> {
        self.read_pixels()?.encode_png()
    }

    /// Capture the last rendered frame to a PNG file.
    ///
    /// Write failures are propagated, exactly like the buffer path.
    pub fn save_screenshot(&self, path: &Path) -> Result<(), VantageError> {
        self.read_pixels()?.write_png(path)
    }
}
