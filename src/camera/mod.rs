//! Camera system for headless scene viewing.
//!
//! Provides the perspective camera, bounding-box-based viewport framing,
//! the encoded camera-string decoder, and GPU uniform plumbing.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Comma-separated camera-string decoding.
pub mod encoded;
/// Bounding-box camera framing math.
pub mod framing;
/// Camera GPU buffer and bind group ownership.
pub mod rig;
