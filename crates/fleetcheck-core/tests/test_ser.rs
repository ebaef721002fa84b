mod common;

use common::{build_ser_header_full, build_ser_with_frames, mono_frame, write_test_ser};
use fleetcheck_core::error::InspectError;
use fleetcheck_core::io::ser::{ColorMode, SerReader};

#[test]
fn test_parse_8bit_mono() {
    let frames = vec![mono_frame(8, 4, 10, None), mono_frame(8, 4, 200, None)];
    let file = write_test_ser(&build_ser_with_frames(8, 4, &frames));

    let reader = SerReader::open(file.path()).unwrap();
    assert_eq!(reader.frame_count(), 2);
    assert_eq!(reader.header.width, 8);
    assert_eq!(reader.header.height, 4);
    assert_eq!(reader.header.color_mode(), ColorMode::Mono);
    assert_eq!(reader.header.observer, "Garage");

    let second = reader.read_frame(1).unwrap();
    assert_eq!(second.frame_index, Some(1));
    assert_eq!(second.dimensions(), (8, 4));
    assert_eq!(second.pixels.get_pixel(3, 2).0, [200, 200, 200]);
}

#[test]
fn test_16bit_samples_are_scaled() {
    let mut buf = build_ser_header_full(2, 1, 16, 1, 0);
    buf.extend_from_slice(&65535u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    let file = write_test_ser(&buf);

    let frame = SerReader::open(file.path()).unwrap().read_frame(0).unwrap();
    assert_eq!(frame.pixels.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(frame.pixels.get_pixel(1, 0).0, [0, 0, 0]);
}

#[test]
fn test_bgr_is_swapped() {
    let mut buf = build_ser_header_full(1, 1, 8, 1, 101);
    buf.extend_from_slice(&[10, 20, 30]);
    let file = write_test_ser(&buf);

    let frame = SerReader::open(file.path()).unwrap().read_frame(0).unwrap();
    assert_eq!(frame.pixels.get_pixel(0, 0).0, [30, 20, 10]);
}

#[test]
fn test_rgb_is_kept() {
    let mut buf = build_ser_header_full(1, 1, 8, 1, 100);
    buf.extend_from_slice(&[10, 20, 30]);
    let file = write_test_ser(&buf);

    let frame = SerReader::open(file.path()).unwrap().read_frame(0).unwrap();
    assert_eq!(frame.pixels.get_pixel(0, 0).0, [10, 20, 30]);
}

#[test]
fn test_bayer_is_rejected() {
    let mut buf = build_ser_header_full(4, 4, 8, 1, 8);
    buf.extend_from_slice(&[0u8; 16]);
    let file = write_test_ser(&buf);

    let err = SerReader::open(file.path()).err().expect("bayer rejected");
    assert!(matches!(err, InspectError::UnsupportedColorMode(_)));
}

#[test]
fn test_truncated_file() {
    let mut buf = build_ser_header_full(8, 8, 8, 3, 0);
    buf.extend_from_slice(&[0u8; 64]);
    let file = write_test_ser(&buf);
    assert!(SerReader::open(file.path()).is_err());
}

#[test]
fn test_bad_magic() {
    let mut buf = build_ser_header_full(2, 2, 8, 1, 0);
    buf[0] = b'X';
    buf.extend_from_slice(&[0u8; 4]);
    let file = write_test_ser(&buf);
    assert!(matches!(
        SerReader::open(file.path()).err(),
        Some(InspectError::Decode(_))
    ));
}

#[test]
fn test_frame_out_of_range() {
    let file = write_test_ser(&build_ser_with_frames(2, 2, &[mono_frame(2, 2, 0, None)]));
    let reader = SerReader::open(file.path()).unwrap();
    assert!(reader.read_frame(1).is_err());
}
