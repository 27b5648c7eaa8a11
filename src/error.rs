//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// A camera or viewport parameter is outside its valid range.
    InvalidParameter(String),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A framing or render operation was requested on a scene with no
    /// geometry.
    EmptyScene,
    /// Failed to decode an encoded camera string.
    CameraParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// PNG encoding failure.
    PngEncode(png::EncodingError),
    /// Pixel readback from the GPU failed.
    Readback(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {msg}")
            }
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::EmptyScene => {
                write!(f, "scene contains no geometry to frame")
            }
            Self::CameraParse(msg) => {
                write!(f, "camera string parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::PngEncode(e) => write!(f, "PNG encode error: {e}"),
            Self::Readback(msg) => write!(f, "pixel readback error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::PngEncode(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for VantageError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<png::EncodingError> for VantageError {
    fn from(e: png::EncodingError) -> Self {
        // The png crate folds I/O failures into its encoding error; keep the
        // I/O variant distinct so callers can match on it.
        match e {
            png::EncodingError::IoError(io) => Self::Io(io),
            other => Self::PngEncode(other),
        }
    }
}
