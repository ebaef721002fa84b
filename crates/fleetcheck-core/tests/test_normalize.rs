mod common;

use common::{capture_with_block, gray_capture};
use fleetcheck_core::detection::{normalize, NormalizeConfig};

#[test]
fn test_dimensions_preserved() {
    let capture = capture_with_block(120, 90, 128, 10, 10, 30, 40);
    let normalized = normalize(&capture, &NormalizeConfig::default());
    assert_eq!(normalized.width(), 120);
    assert_eq!(normalized.height(), 90);
}

#[test]
fn test_disabled_passes_through() {
    let capture = capture_with_block(64, 64, 100, 8, 8, 16, 200);
    let config = NormalizeConfig {
        enabled: false,
        ..Default::default()
    };
    let normalized = normalize(&capture, &config);
    assert_eq!(normalized.pixels, capture.pixels);
}

#[test]
fn test_uniform_capture_stays_uniform() {
    let capture = gray_capture(200, 200, 128);
    let normalized = normalize(&capture, &NormalizeConfig::default());
    let first = *normalized.pixels.get_pixel(0, 0);
    assert!(normalized.pixels.pixels().all(|p| *p == first));
}

#[test]
fn test_gray_stays_neutral() {
    let capture = capture_with_block(100, 100, 90, 20, 20, 50, 170);
    let normalized = normalize(&capture, &NormalizeConfig::default());
    for p in normalized.pixels.pixels() {
        let [r, g, b] = p.0;
        assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "pixel {:?} not neutral", p.0);
    }
}

#[test]
fn test_contrast_is_stretched() {
    // A low-contrast capture gains contrast after equalization.
    let capture = capture_with_block(160, 160, 120, 40, 40, 80, 135);
    let normalized = normalize(&capture, &NormalizeConfig::default());
    let inside = normalized.pixels.get_pixel(80, 80).0[0] as i32;
    let outside = normalized.pixels.get_pixel(5, 5).0[0] as i32;
    assert!(inside - outside >= 15, "inside {inside}, outside {outside}");
}

#[test]
fn test_empty_capture() {
    let capture = gray_capture(0, 0, 0);
    let normalized = normalize(&capture, &NormalizeConfig::default());
    assert_eq!(normalized.width(), 0);
}
