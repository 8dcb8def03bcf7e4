mod common;

use cardlens_core::error::LensError;
use cardlens_core::io::{decode_image, dimensions_of, load_image, save_png, ImageSlot, SlotState};
use image::{Rgba, RgbaImage};

use common::{gradient_image, write_test_png};

#[test]
fn test_load_png_reports_dimensions() {
    let (_dir, path) = write_test_png(&gradient_image(12, 16), "upload.png");
    let img = load_image(&path).unwrap();
    let dims = dimensions_of(&img);
    assert_eq!((dims.width, dims.height), (12, 16));
}

#[test]
fn test_save_png_then_load() {
    let mut raster = RgbaImage::new(4, 3);
    raster.put_pixel(1, 2, Rgba([10, 200, 30, 255]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diff.png");
    save_png(&raster, &path).unwrap();

    let loaded = load_image(&path).unwrap().to_rgba8();
    assert_eq!(loaded.dimensions(), (4, 3));
    assert_eq!(loaded.get_pixel(1, 2).0, [10, 200, 30, 255]);
    assert_eq!(loaded.get_pixel(0, 0).0[3], 0);
}

#[test]
fn test_load_missing_file_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_image(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, LensError::Decode { .. }), "{err}");
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn test_decode_garbage_bytes_fails() {
    let err = decode_image(b"definitely not an image", "upload").unwrap_err();
    match err {
        LensError::Decode { source_name, .. } => assert_eq!(source_name, "upload"),
        other => panic!("expected decode error, got {other}"),
    }
}

#[test]
fn test_decode_from_memory() {
    let (_dir, path) = write_test_png(&gradient_image(5, 7), "mem.png");
    let bytes = std::fs::read(&path).unwrap();
    let img = decode_image(&bytes, "mem.png").unwrap();
    assert_eq!((img.width(), img.height()), (5, 7));
}

#[test]
fn test_slot_lifecycle() {
    let mut slot = ImageSlot::new();
    assert!(matches!(slot.state(), SlotState::Empty));
    let g0 = slot.generation();

    let ticket = slot.begin_load();
    assert!(matches!(slot.state(), SlotState::Loading));
    assert!(slot.dimensions().is_none());

    assert!(slot.finish(ticket, Ok(gradient_image(3, 2))));
    let dims = slot.dimensions().unwrap();
    assert_eq!((dims.width, dims.height), (3, 2));
    assert!(slot.generation() > g0);

    slot.clear();
    assert!(matches!(slot.state(), SlotState::Empty));
    assert!(!slot.finish(ticket, Ok(gradient_image(9, 9))), "cleared slot drops old ticket");
}
