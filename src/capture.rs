//! Pixel readback and PNG screenshot encoding.
//!
//! [`read_target_pixels`] copies the readback render target into a mapped
//! buffer and strips wgpu's 256-byte row padding, producing a tightly
//! packed RGBA [`PixelData`] with top-to-bottom rows. Sources that read out
//! bottom-to-top (the GL convention) go through
//! [`PixelData::from_bottom_up`], which performs the vertical row flip.
//! Both PNG paths — in-memory buffer and file — propagate errors.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::VantageError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;

/// Bytes per RGBA pixel.
const BYTES_PER_PIXEL: u32 = 4;

/// A tightly packed RGBA image, rows stored top-to-bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major, top row first.
    pub rgba: Vec<u8>,
}

impl PixelData {
    /// Wrap an RGBA buffer whose rows already run top-to-bottom.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::InvalidParameter`] if the buffer length does
    /// not match the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Self, VantageError> {
        // u64 so pathological dimensions cannot overflow before the check.
        let expected =
            u64::from(width) * u64::from(height) * u64::from(BYTES_PER_PIXEL);
        if rgba.len() as u64 != expected {
            return Err(VantageError::InvalidParameter(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Wrap an RGBA buffer whose rows run bottom-to-top (GL readback
    /// convention), flipping it vertically: output row `y` is input row
    /// `height - 1 - y`, byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::InvalidParameter`] if the buffer length does
    /// not match the dimensions.
    pub fn from_bottom_up(
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Self, VantageError> {
        let expected =
            u64::from(width) * u64::from(height) * u64::from(BYTES_PER_PIXEL);
        if rgba.len() as u64 != expected {
            return Err(VantageError::InvalidParameter(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        let row_bytes = (width * BYTES_PER_PIXEL) as usize;
        let mut flipped = Vec::with_capacity(rgba.len());
        for row in rgba.chunks_exact(row_bytes).rev() {
            flipped.extend_from_slice(row);
        }
        Self::new(width, height, flipped)
    }

    /// Encode the image as a PNG and return the encoded bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, VantageError> {
        let mut out = Vec::new();
        self.encode_png_into(&mut out)?;
        Ok(out)
    }

    /// Encode the image as a PNG file at `path`.
    ///
    /// File-write failures are propagated, same as the buffer path.
    pub fn write_png(&self, path: &Path) -> Result<(), VantageError> {
        let file = std::fs::File::create(path)?;
        self.encode_png_into(std::io::BufWriter::new(file))?;
        log::info!(
            "wrote {}x{} screenshot to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    fn encode_png_into<W: std::io::Write>(
        &self,
        writer: W,
    ) -> Result<(), VantageError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.rgba)?;
        png_writer.finish()?;
        Ok(())
    }
}

/// Read the pixels of a rendered frame back from the GPU.
///
/// Copies the target into a `MAP_READ` buffer with 256-byte-aligned rows,
/// blocks until the map completes, and strips the padding. Must only be
/// called after the frame's render has been submitted; render and readback
/// of the same frame never overlap.
///
/// # Errors
///
/// Returns [`VantageError::Readback`] if the buffer mapping fails.
pub fn read_target_pixels(
    context: &RenderContext,
    target: &RenderTarget,
) -> Result<PixelData, VantageError> {
    let width = target.width;
    let height = target.height;
    let padded_row_bytes = (width * BYTES_PER_PIXEL).next_multiple_of(256);
    let buffer_size = u64::from(padded_row_bytes) * u64::from(height);

    let buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: buffer_size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = context.create_encoder();
    encoder.copy_texture_to_buffer(
        target.texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row_bytes),
                rows_per_image: None,
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    context.submit(encoder);

    // Block until the map callback lands; headless capture is synchronous.
    let slice = buffer.slice(..);
    let done = Arc::new(AtomicBool::new(false));
    let failed = Arc::new(AtomicBool::new(false));
    let (done_cb, failed_cb) = (done.clone(), failed.clone());
    slice.map_async(wgpu::MapMode::Read, move |result| {
        if result.is_err() {
            failed_cb.store(true, Ordering::SeqCst);
        }
        done_cb.store(true, Ordering::SeqCst);
    });
    while !done.load(Ordering::SeqCst) {
        let _ = context
            .device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| VantageError::Readback(e.to_string()))?;
    }
    if failed.load(Ordering::SeqCst) {
        return Err(VantageError::Readback(
            "buffer map_async reported failure".into(),
        ));
    }

    let data = slice.get_mapped_range();
    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    let mut rgba = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * padded_row_bytes as usize;
        rgba.extend_from_slice(&data[start..start + row_bytes]);
    }
    drop(data);
    buffer.unmap();

    PixelData::new(width, height, rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an N x M RGBA buffer where every byte encodes its row index.
    fn row_tagged_buffer(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        for y in 0..height {
            for _ in 0..width * BYTES_PER_PIXEL {
                buf.push(y as u8);
            }
        }
        buf
    }

    #[test]
    fn flip_reverses_every_row() {
        let (width, height) = (3, 5);
        let src = row_tagged_buffer(width, height);
        let flipped =
            PixelData::from_bottom_up(width, height, &src).unwrap();

        let row_bytes = (width * BYTES_PER_PIXEL) as usize;
        for y in 0..height as usize {
            let out_row =
                &flipped.rgba[y * row_bytes..(y + 1) * row_bytes];
            let src_y = height as usize - 1 - y;
            let in_row = &src[src_y * row_bytes..(src_y + 1) * row_bytes];
            assert_eq!(out_row, in_row, "row {y}");
        }
    }

    #[test]
    fn flip_twice_is_identity() {
        let (width, height) = (4, 3);
        let src: Vec<u8> =
            (0..width * height * BYTES_PER_PIXEL).map(|i| i as u8).collect();
        let once = PixelData::from_bottom_up(width, height, &src).unwrap();
        let twice =
            PixelData::from_bottom_up(width, height, &once.rgba).unwrap();
        assert_eq!(twice.rgba, src);
    }

    #[test]
    fn single_row_flip_is_identity() {
        let src = vec![9u8; 4 * 4];
        let flipped = PixelData::from_bottom_up(4, 1, &src).unwrap();
        assert_eq!(flipped.rgba, src);
    }

    #[test]
    fn rejects_mismatched_buffer_length() {
        assert!(PixelData::new(2, 2, vec![0u8; 15]).is_err());
        assert!(PixelData::from_bottom_up(2, 2, &[0u8; 17]).is_err());
    }

    #[test]
    fn oversized_dimensions_are_rejected_without_overflow() {
        // 65536 * 65536 * 4 wraps a u32 to zero; the length check must not
        // overflow (or accept an empty buffer) for such dimensions.
        assert!(PixelData::new(65536, 65536, Vec::new()).is_err());
        assert!(PixelData::new(65536, 65536, vec![0u8; 16]).is_err());
        assert!(PixelData::from_bottom_up(65536, 65536, &[0u8; 16]).is_err());
    }

    #[test]
    fn png_round_trips_through_decoder() {
        let width = 2;
        let height = 2;
        let rgba = vec![
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 255, 255, 255, // white
        ];
        let pixels =
            PixelData::new(width, height, rgba.clone()).unwrap();
        let encoded = pixels.encode_png().unwrap();

        let decoder = png::Decoder::new(encoded.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut decoded = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut decoded).unwrap();
        assert_eq!(info.width, width);
        assert_eq!(info.height, height);
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&decoded[..info.buffer_size()], rgba.as_slice());
    }

    #[test]
    fn write_png_propagates_io_errors() {
        let pixels = PixelData::new(1, 1, vec![0u8; 4]).unwrap();
        let bad_path = Path::new("/nonexistent-dir/screenshot.png");
        assert!(matches!(
            pixels.write_png(bad_path),
            Err(VantageError::Io(_))
        ));
    }
}
