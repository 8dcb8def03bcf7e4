mod common;

use cardlens_core::alignment::AlignmentSettings;
use cardlens_core::diff::{render_slots, DiffOutput, DiffParams, DiffRenderer};
use cardlens_core::error::LensError;
use cardlens_core::geometry::Size;
use cardlens_core::io::ImageSlot;

use common::{gradient_image, ready_slot, solid_image};

const VIEW: Size = Size::new(40.0, 40.0);

fn params(alignment: &AlignmentSettings, container: Size, dpr: f64) -> DiffParams<'_> {
    DiffParams {
        alignment,
        container,
        device_pixel_ratio: dpr,
        mismatch_threshold: 0.1,
    }
}

fn ready(output: &DiffOutput) -> &cardlens_core::diff::DiffFrame {
    match output {
        DiffOutput::Ready(frame) => frame,
        other => panic!("expected a rendered frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_identical_images_render_black() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    let frame = ready(&output);

    assert_eq!(frame.image.dimensions(), (40, 40));
    for px in frame.image.pixels() {
        assert_eq!(px.0, [0, 0, 0, 255], "identity difference should be black");
    }
    assert_eq!(frame.stats.covered_pixels, 1600);
    assert!(frame.stats.mean_difference < 1e-3);
    assert_eq!(frame.stats.mismatch_fraction, 0.0);
}

#[test]
fn test_opposite_colors_render_full_difference() {
    let reference = ready_slot(solid_image(10, 10, [0, 0, 0]));
    let uploaded = ready_slot(solid_image(10, 10, [255, 255, 255]));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    let frame = ready(&output);

    assert_eq!(frame.image.get_pixel(20, 20).0, [255, 255, 255, 255]);
    assert!((frame.stats.mismatch_fraction - 1.0).abs() < 1e-6);
    assert!((frame.stats.max_difference - 1.0).abs() < 1e-6);
}

#[test]
fn test_offset_alignment_exposes_difference() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings {
        offset_x: 8.0,
        ..AlignmentSettings::identity()
    };

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    let frame = ready(&output);
    assert!(frame.stats.mean_difference > 0.05);
    // Left strip is reference only: the uploaded layer moved right.
    let left = frame.image.get_pixel(2, 20).0;
    assert_eq!(left[3], 255);
    assert!(left[0] < 40, "left strip keeps the dark end of the ramp: {left:?}");
}

#[test]
fn test_letterbox_stays_transparent() {
    let reference = ready_slot(solid_image(20, 40, [200, 10, 10]));
    let uploaded = ready_slot(solid_image(20, 40, [200, 10, 10]));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    let frame = ready(&output);

    // 20x40 fits as 20x40 centered: columns 10..30 covered.
    assert_eq!(frame.image.get_pixel(5, 20).0[3], 0);
    assert_eq!(frame.image.get_pixel(35, 20).0[3], 0);
    assert_eq!(frame.image.get_pixel(20, 20).0, [0, 0, 0, 255]);
}

#[test]
fn test_device_pixel_ratio_scales_raster() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 2.0));
    assert_eq!(ready(&output).image.dimensions(), (80, 80));
}

#[test]
fn test_zero_container_renders_empty_frame() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, Size::ZERO, 1.0));
    let frame = ready(&output);
    assert_eq!(frame.image.dimensions(), (0, 0));
    assert_eq!(frame.stats.covered_pixels, 0);
}

// ---------------------------------------------------------------------------
// Not-ready and failure states
// ---------------------------------------------------------------------------

#[test]
fn test_oversized_pixel_ratio_reports_failure() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(
        &reference,
        &uploaded,
        &params(&alignment, Size::new(448.0, 640.0), 1.0e7),
    );
    match &output {
        DiffOutput::Failed(msg) => assert!(msg.contains("pixel limit"), "{msg}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_pending_until_both_loaded() {
    let reference = ready_slot(gradient_image(20, 20));
    let mut uploaded = ImageSlot::new();
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    assert!(matches!(output, DiffOutput::Pending));
    assert!(output.status_text().is_some());

    uploaded.begin_load();
    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    assert!(matches!(output, DiffOutput::Pending));
}

#[test]
fn test_decode_failure_reported() {
    let reference = ready_slot(gradient_image(20, 20));
    let mut uploaded = ImageSlot::new();
    uploaded.load_now(Err(LensError::Decode {
        source_name: "upload.jpg".into(),
        message: "truncated".into(),
    }));
    let alignment = AlignmentSettings::identity();

    let output = render_slots(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    match &output {
        DiffOutput::Failed(msg) => {
            assert!(msg.contains("uploaded"), "{msg}");
            assert!(msg.contains("truncated"), "{msg}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(output.frame().is_none());
}

// ---------------------------------------------------------------------------
// Render cache
// ---------------------------------------------------------------------------

#[test]
fn test_renderer_reuses_unchanged_inputs() {
    let reference = ready_slot(gradient_image(20, 20));
    let uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();
    let mut renderer = DiffRenderer::new();

    renderer.render(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    renderer.render(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    assert_eq!(renderer.render_count(), 1);

    let moved = AlignmentSettings {
        rotate: 5.0,
        ..AlignmentSettings::identity()
    };
    renderer.render(&reference, &uploaded, &params(&moved, VIEW, 1.0));
    assert_eq!(renderer.render_count(), 2);

    renderer.render(&reference, &uploaded, &params(&moved, VIEW, 2.0));
    assert_eq!(renderer.render_count(), 3);

    renderer.render(&reference, &uploaded, &params(&moved, Size::new(50.0, 40.0), 2.0));
    assert_eq!(renderer.render_count(), 4);
}

#[test]
fn test_renderer_rerenders_on_new_source() {
    let reference = ready_slot(gradient_image(20, 20));
    let mut uploaded = ready_slot(gradient_image(20, 20));
    let alignment = AlignmentSettings::identity();
    let mut renderer = DiffRenderer::new();

    renderer.render(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    uploaded.load_now(Ok(solid_image(20, 20, [255, 0, 0])));
    let output = renderer.render(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    assert!(ready(output).stats.mean_difference > 0.1);
    assert_eq!(renderer.render_count(), 2);

    renderer.invalidate();
    renderer.render(&reference, &uploaded, &params(&alignment, VIEW, 1.0));
    assert_eq!(renderer.render_count(), 3);
}
