mod common;

use common::capture_with_block;
use fleetcheck_core::error::InspectError;
use fleetcheck_core::frame::{Capture, ChangeMask};
use fleetcheck_core::io::{load_capture, save_capture, save_image, save_mask};
use ndarray::Array2;

#[test]
fn test_save_load_capture_png() {
    let capture = capture_with_block(32, 24, 90, 4, 4, 8, 200);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("capture.png");

    save_capture(&capture, &path).unwrap();
    let loaded = load_capture(&path).unwrap();

    assert_eq!(loaded.width(), 32);
    assert_eq!(loaded.height(), 24);
    assert_eq!(loaded.pixels, capture.pixels);
}

#[test]
fn test_save_mask_as_gray() {
    let mut data = Array2::from_elem((6, 8), false);
    data[[2, 3]] = true;
    data[[5, 7]] = true;
    let mask = ChangeMask::new(data);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.png");
    save_mask(&mask, &path).unwrap();

    let img = image::open(&path).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (8, 6));
    assert_eq!(img.get_pixel(3, 2).0[0], 255);
    assert_eq!(img.get_pixel(7, 5).0[0], 255);
    assert_eq!(img.get_pixel(0, 0).0[0], 0);
}

#[test]
fn test_save_image_follows_extension() {
    let capture = capture_with_block(16, 16, 50, 0, 0, 4, 250);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.bmp");
    save_image(&capture, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"BM");
    assert_eq!(load_capture(&path).unwrap().pixels, capture.pixels);
}

#[test]
fn test_load_garbage_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let err = load_capture(&path).unwrap_err();
    assert!(matches!(err, InspectError::Decode(_)), "got {err:?}");
}

#[test]
fn test_decode_garbage_bytes() {
    let err = Capture::decode(&[0x13, 0x37, 0x00, 0xff, 0x42]).unwrap_err();
    assert!(matches!(err, InspectError::Decode(_)), "got {err:?}");
}

#[test]
fn test_load_ignores_misleading_extension() {
    let capture = capture_with_block(12, 10, 30, 2, 2, 4, 180);
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("capture.png");
    save_capture(&capture, &png).unwrap();
    let renamed = dir.path().join("capture.jpg");
    std::fs::rename(&png, &renamed).unwrap();

    assert_eq!(load_capture(&renamed).unwrap().pixels, capture.pixels);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_capture(&dir.path().join("absent.png")).unwrap_err();
    assert!(matches!(err, InspectError::Io(_)), "got {err:?}");
}
