mod common;

use std::path::PathBuf;

use common::{capture_with_block, gray_capture};
use fleetcheck_core::error::InspectError;
use fleetcheck_core::inspection::MemoryAnnotationSink;
use fleetcheck_core::pipeline::{analyze, compare_captures, Angle, AngleStatus, PairConfig};

#[test]
fn test_first_record_without_reference() {
    let sink = MemoryAnnotationSink::new();
    let new = gray_capture(200, 200, 128);
    let result = analyze(None, &new, Angle::Front, "KA01", &PairConfig::default(), &sink).unwrap();

    assert_eq!(result.status, AngleStatus::FirstRecord);
    assert_eq!(result.score, 0);
    assert!(result.annotated_path.is_none());
    assert!(sink.names().is_empty());
}

#[test]
fn test_first_record_is_repeatable() {
    let sink = MemoryAnnotationSink::new();
    let new = capture_with_block(120, 90, 128, 20, 20, 30, 40);
    let config = PairConfig::default();

    let first = analyze(None, &new, Angle::Left, "34ABC123", &config, &sink).unwrap();
    let second = analyze(None, &new, Angle::Left, "34ABC123", &config, &sink).unwrap();

    for result in [&first, &second] {
        assert_eq!(result.status, AngleStatus::FirstRecord);
        assert_eq!(result.score, 0);
        assert!(result.annotated_path.is_none());
    }
    assert!(sink.names().is_empty());
}

#[test]
fn test_identical_captures_are_clean() {
    let sink = MemoryAnnotationSink::new();
    let reference = capture_with_block(200, 200, 128, 60, 60, 50, 90);
    let result = analyze(
        Some(&reference),
        &reference.clone(),
        Angle::Rear,
        "KA01",
        &PairConfig::default(),
        &sink,
    )
    .unwrap();

    assert_eq!(result.status, AngleStatus::Clean);
    assert_eq!(result.score, 0);
    assert!(result.regions.is_empty());
    assert!(result.annotated_path.is_none());
}

#[test]
fn test_dark_block_is_one_region() {
    let sink = MemoryAnnotationSink::new();
    let reference = gray_capture(200, 200, 128);
    let new = capture_with_block(200, 200, 128, 80, 80, 40, 40);

    let result = analyze(Some(&reference), &new, Angle::Front, "KA01", &PairConfig::default(), &sink).unwrap();

    assert_eq!(result.status, AngleStatus::Changed { regions: 1 });
    assert_eq!(result.score, 1);
    let region = result.regions[0];
    assert!((1400..=1900).contains(&region.area), "area {}", region.area);
    assert!(region.x.abs_diff(80) <= 2 && region.y.abs_diff(80) <= 2);

    assert_eq!(result.annotated_path, Some(PathBuf::from("annotated_front_KA01.png")));
    let annotated = sink.get("annotated_front_KA01").expect("stored annotation");
    assert_eq!(annotated.dimensions(), (200, 200));
}

#[test]
fn test_new_capture_is_resized_to_reference() {
    let reference = gray_capture(200, 200, 128);
    // Same scene at twice the resolution.
    let new = capture_with_block(400, 400, 128, 160, 160, 80, 40);

    let comparison = compare_captures(&reference, &new, &PairConfig::default()).unwrap();
    assert_eq!(comparison.mask.width(), 200);
    assert_eq!(comparison.mask.height(), 200);
    assert_eq!(comparison.status(), AngleStatus::Changed { regions: 1 });
    let area = comparison.regions[0].area;
    assert!((1400..=1900).contains(&area), "area {area}");
}

#[test]
fn test_small_change_below_min_area_is_clean() {
    let sink = MemoryAnnotationSink::new();
    let reference = gray_capture(200, 200, 128);
    let new = capture_with_block(200, 200, 128, 50, 50, 15, 20);

    let result = analyze(Some(&reference), &new, Angle::Left, "KA01", &PairConfig::default(), &sink).unwrap();
    assert_eq!(result.status, AngleStatus::Clean);
    assert!(sink.names().is_empty());
}

#[test]
fn test_two_separate_changes() {
    let reference = gray_capture(300, 200, 128);
    let mut new = capture_with_block(300, 200, 128, 20, 20, 40, 30);
    for y in 100..150 {
        for x in 200..250 {
            new.pixels.put_pixel(x, y, image::Rgb([230, 230, 230]));
        }
    }

    let comparison = compare_captures(&reference, &new, &PairConfig::default()).unwrap();
    assert_eq!(comparison.status(), AngleStatus::Changed { regions: 2 });
    assert!(comparison.regions[0].area >= comparison.regions[1].area);
}

#[test]
fn test_empty_capture_is_rejected() {
    let sink = MemoryAnnotationSink::new();
    let reference = gray_capture(100, 100, 128);
    let empty = gray_capture(0, 0, 0);
    let err = analyze(Some(&reference), &empty, Angle::Front, "KA01", &PairConfig::default(), &sink).unwrap_err();
    assert!(matches!(err, InspectError::DimensionMismatch { .. }));
}
