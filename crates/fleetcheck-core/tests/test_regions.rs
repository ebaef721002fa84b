mod common;

use common::gray_capture;
use fleetcheck_core::detection::{extract_regions, find_regions, RegionConfig};
use fleetcheck_core::frame::ChangeMask;
use ndarray::Array2;

fn mask_with(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> ChangeMask {
    let mut data = Array2::from_elem((height, width), false);
    for &(x, y, w, h) in rects {
        for row in y..y + h {
            for col in x..x + w {
                data[[row, col]] = true;
            }
        }
    }
    ChangeMask::new(data)
}

#[test]
fn test_single_block() {
    let mask = mask_with(200, 200, &[(50, 60, 40, 40)]);
    let regions = find_regions(&mask, 600);
    assert_eq!(regions.len(), 1);
    let r = regions[0];
    assert_eq!((r.x, r.y, r.width, r.height), (50, 60, 40, 40));
    assert_eq!(r.area, 1600);
}

#[test]
fn test_min_area_is_strict() {
    // 20x30 = 600 is not strictly larger than the minimum.
    let mask = mask_with(200, 200, &[(10, 10, 20, 30), (100, 100, 25, 25)]);
    let regions = find_regions(&mask, 600);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].area, 625);
}

#[test]
fn test_small_noise_is_dropped() {
    let mask = mask_with(100, 100, &[(5, 5, 3, 3), (50, 50, 10, 10)]);
    assert!(find_regions(&mask, 600).is_empty());
}

#[test]
fn test_ring_encloses_its_hole() {
    // 50x50 ring, 5 px thick: 900 px of stroke, 2500 px enclosed.
    let mask = mask_with(
        120,
        120,
        &[(20, 20, 50, 5), (20, 65, 50, 5), (20, 25, 5, 40), (65, 25, 5, 40)],
    );
    let regions = find_regions(&mask, 600);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].area, 2500);
}

#[test]
fn test_diagonal_touch_merges() {
    let mask = mask_with(200, 200, &[(10, 10, 30, 30), (40, 40, 30, 30)]);
    let regions = find_regions(&mask, 600);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].area, 1800);
}

#[test]
fn test_largest_first() {
    let mask = mask_with(300, 300, &[(10, 10, 30, 30), (100, 100, 60, 60), (200, 10, 40, 40)]);
    let areas: Vec<usize> = find_regions(&mask, 600).iter().map(|r| r.area).collect();
    assert_eq!(areas, vec![3600, 1600, 900]);
}

#[test]
fn test_annotation_boxes_regions_on_a_copy() {
    let mask = mask_with(100, 100, &[(20, 20, 40, 40)]);
    let base = gray_capture(100, 100, 128);
    let extraction = extract_regions(&mask, &base, &RegionConfig::default());

    assert_eq!(extraction.count(), 1);
    let annotated = extraction.annotated.expect("annotated capture");
    assert_eq!(annotated.pixels.get_pixel(20, 20).0, [255, 0, 0]);
    assert_eq!(annotated.pixels.get_pixel(22, 40).0, [255, 0, 0]);
    assert_eq!(annotated.pixels.get_pixel(40, 40).0, [128, 128, 128]);
    assert_eq!(base.pixels.get_pixel(20, 20).0, [128, 128, 128]);
}

#[test]
fn test_no_regions_no_annotation() {
    let mask = mask_with(50, 50, &[]);
    let extraction = extract_regions(&mask, &gray_capture(50, 50, 0), &RegionConfig::default());
    assert_eq!(extraction.count(), 0);
    assert!(extraction.annotated.is_none());
}
