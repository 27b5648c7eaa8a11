//! GPU resource management utilities.
//!
//! Provides headless wgpu device/queue initialization, render-target
//! textures, and shared pipeline boilerplate.

/// Shared wgpu boilerplate helpers for screen-space pipelines.
pub mod pipeline_helpers;
/// Headless wgpu device and queue initialization.
pub mod render_context;
/// Render-target and depth texture abstractions.
pub mod texture;
