//! Render configuration with TOML preset support.
//!
//! All tweakable capture settings (viewport size, clear color, camera
//! projection defaults, SSAA) are consolidated here. Options serialize
//! to/from TOML so capture presets can live next to model assets. Every
//! sub-struct uses `#[serde(default)]` so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VantageError;

/// Off-screen viewport settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportOptions {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Background clear color, linear RGB.
    pub clear_color: [f64; 3],
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            clear_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Camera projection defaults applied at engine construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 2000.0,
        }
    }
}

/// Supersampled anti-aliasing settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SsaaOptions {
    /// Whether renders go through the SSAA resolve pass.
    pub enabled: bool,
    /// Supersampling scale factor (2 = render at 2x and downsample).
    pub scale: u32,
}

impl Default for SsaaOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 2,
        }
    }
}

/// Top-level render options container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RenderOptions {
    /// Off-screen viewport settings.
    pub viewport: ViewportOptions,
    /// Camera projection defaults.
    pub camera: CameraOptions,
    /// Supersampled anti-aliasing settings.
    pub ssaa: SsaaOptions,
}

impl RenderOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The clear color as a wgpu color (alpha fixed at 1).
    #[must_use]
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.viewport.clear_color;
        wgpu::Color { r, g, b, a: 1.0 }
    }
}
