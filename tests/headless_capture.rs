//! End-to-end headless render and capture tests.
//!
//! These need a real GPU adapter; on machines without one (most CI
//! runners) each test logs a skip notice and returns early instead of
//! failing.

use glam::Vec3;
use vantage::camera::framing::FramingMode;
use vantage::engine::HeadlessEngine;
use vantage::error::VantageError;
use vantage::options::RenderOptions;
use vantage::scene::mesh::MeshData;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build an engine, or `None` when no GPU adapter is available.
fn try_engine(options: RenderOptions) -> Option<HeadlessEngine> {
    match HeadlessEngine::new(options) {
        Ok(engine) => Some(engine),
        Err(VantageError::Gpu(e)) => {
            log::warn!("skipping GPU test, no usable adapter: {e}");
            None
        }
        Err(other) => panic!("engine construction failed: {other}"),
    }
}

fn small_options(ssaa: bool) -> RenderOptions {
    let mut options = RenderOptions::default();
    options.viewport.width = 64;
    options.viewport.height = 48;
    options.ssaa.enabled = ssaa;
    options
}

#[test]
fn direct_render_capture_has_expected_dimensions() {
    init_logging();
    let Some(mut engine) = try_engine(small_options(false)) else {
        return;
    };

    engine.add_mesh(&MeshData::cube(Vec3::ZERO, 2.0));
    engine
        .frame_scene(FramingMode::Frontal { angle_deg: None })
        .unwrap();
    engine.render();

    let pixels = engine.read_pixels().unwrap();
    assert_eq!(pixels.width, 64);
    assert_eq!(pixels.height, 48);
    assert_eq!(pixels.rgba.len(), 64 * 48 * 4);

    // White clear color: the corner pixel is background.
    assert_eq!(&pixels.rgba[..3], &[255, 255, 255]);
    // The framed cube covers the viewport center.
    let center = ((48 / 2) * 64 + 64 / 2) * 4;
    let center_px = &pixels.rgba[center..center + 3];
    assert_ne!(center_px, &[255, 255, 255]);
}

#[test]
fn ssaa_render_capture_matches_output_size() {
    init_logging();
    let Some(mut engine) = try_engine(small_options(true)) else {
        return;
    };

    engine.add_mesh(&MeshData::cube(Vec3::new(1.0, 0.0, 0.0), 1.5));
    engine
        .frame_scene(FramingMode::Frontal {
            angle_deg: Some(30.0),
        })
        .unwrap();
    engine.render();

    // The resolve pass downsamples back to the native viewport size.
    let pixels = engine.read_pixels().unwrap();
    assert_eq!(pixels.width, 64);
    assert_eq!(pixels.height, 48);
}

#[test]
fn screenshot_round_trips_through_png() {
    init_logging();
    let Some(mut engine) = try_engine(small_options(false)) else {
        return;
    };

    engine.add_mesh(&MeshData::cube(Vec3::ZERO, 2.0));
    engine.frame_scene(FramingMode::TopDown).unwrap();
    engine.render();

    let encoded = engine.screenshot_png().unwrap();
    let decoder = png::Decoder::new(encoded.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut decoded = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut decoded).unwrap();
    assert_eq!(info.width, 64);
    assert_eq!(info.height, 48);
}

#[test]
fn framing_empty_scene_errors() {
    init_logging();
    let Some(mut engine) = try_engine(small_options(false)) else {
        return;
    };
    assert!(matches!(
        engine.frame_scene(FramingMode::TopDown),
        Err(VantageError::EmptyScene)
    ));
}

#[test]
fn camera_string_moves_the_eye() {
    init_logging();
    let Some(mut engine) = try_engine(small_options(false)) else {
        return;
    };
    engine.apply_camera_string("1,2,3").unwrap();
    assert_eq!(engine.camera().camera.eye, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(engine.camera().camera.target, Vec3::ZERO);
}
