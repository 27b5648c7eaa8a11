// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics code casts between numeric types constantly; these are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]

//! Headless 3D scene setup and screenshot capture built on wgpu.
//!
//! Vantage renders simple mesh scenes entirely off-screen — no window, no
//! swapchain — frames a model in the viewport with camera math, optionally
//! applies a supersampled anti-aliasing (SSAA) + gamma-correction resolve
//! pass, and reads the result back as a PNG buffer or file.
//!
//! # Key entry points
//!
//! - [`engine::HeadlessEngine`] - context, scene, camera, and capture wiring
//! - [`camera::framing`] - camera-fitting math ([`camera::framing::fit_camera_to_bounds`])
//! - [`capture::PixelData`] - readback pixels and PNG encoding
//! - [`options::RenderOptions`] - TOML-backed render configuration
//!
//! # Architecture
//!
//! [`gpu::render_context::RenderContext`] owns the wgpu device and queue and
//! is created without any surface; every collaborator receives it explicitly
//! rather than reaching for process-global state. A frame is rendered either
//! directly into the readback target, or — when SSAA is enabled — into a
//! `render_scale`× high-resolution target that a resolve pass downsamples
//! and gamma-corrects. Rendering and pixel readback are synchronous per
//! frame: the readback of a frame never overlaps its render.

pub mod camera;
pub mod capture;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod scene;

pub use camera::framing::{Aabb, FramingMode};
pub use engine::HeadlessEngine;
pub use error::VantageError;
pub use options::RenderOptions;
