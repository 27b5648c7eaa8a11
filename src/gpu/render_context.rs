use std::fmt;

/// Errors that can occur during GPU context initialization.
#[derive(Debug)]
pub enum RenderContextError {
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// GPU device request failed (limits or features not met).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Requested off-screen dimensions are unusable (zero width or height).
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid off-screen dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::InvalidDimensions { .. } => None,
        }
    }
}

/// Color format for all off-screen render targets.
///
/// Linear (non-sRGB) so readback bytes match what the shaders wrote; the
/// SSAA resolve pass applies gamma encoding itself, mirroring a
/// gamma-correction post-process stage.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Owns the core wgpu resources for headless rendering: device, queue, and
/// the off-screen viewport dimensions. There is no surface and no window —
/// every collaborator receives this context explicitly.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    /// Off-screen viewport width in pixels.
    pub width: u32,
    /// Off-screen viewport height in pixels.
    pub height: u32,
    /// Supersampling scale factor (1 = native, 2 = 2x SSAA).
    pub render_scale: u32,
}

impl RenderContext {
    /// Create a headless render context with the given off-screen viewport
    /// size. No surface is created; rendering goes to textures only.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if the dimensions are zero or the
    /// adapter/device request fails. Failure is fatal; there is no retry.
    pub async fn headless(
        width: u32,
        height: u32,
    ) -> Result<Self, RenderContextError> {
        if width == 0 || height == 0 {
            return Err(RenderContextError::InvalidDimensions {
                width,
                height,
            });
        }

        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        log::info!("headless adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Headless Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        Ok(Self {
            device,
            queue,
            width,
            height,
            render_scale: 1,
        })
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Internal render width (viewport width * `render_scale`).
    #[must_use]
    pub fn render_width(&self) -> u32 {
        self.width * self.render_scale
    }

    /// Internal render height (viewport height * `render_scale`).
    #[must_use]
    pub fn render_height(&self) -> u32 {
        self.height * self.render_scale
    }

    /// Create a new command encoder for recording GPU commands.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// Finish the encoder and submit its command buffer to the GPU queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}
