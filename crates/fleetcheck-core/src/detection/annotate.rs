use image::{Rgb, RgbImage};

use crate::frame::Region;

/// Draw a rectangle outline of the given stroke width, growing inward from the region's bounds.
///
/// Edges falling outside the image are clipped.
pub fn draw_region(img: &mut RgbImage, region: &Region, color: Rgb<u8>, thickness: u32) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || region.width == 0 || region.height == 0 {
        return;
    }
    let x0 = region.x;
    let y0 = region.y;
    let x1 = (region.x + region.width - 1).min(w - 1);
    let y1 = (region.y + region.height - 1).min(h - 1);

    for t in 0..thickness.max(1) {
        let xx0 = x0.saturating_add(t);
        let yy0 = y0.saturating_add(t);
        let xx1 = x1.saturating_sub(t);
        let yy1 = y1.saturating_sub(t);
        if xx0 >= w || yy0 >= h || xx0 > xx1 || yy0 > yy1 {
            break;
        }
        for x in xx0..=xx1 {
            img.put_pixel(x, yy0, color);
            img.put_pixel(x, yy1, color);
        }
        for y in yy0..=yy1 {
            img.put_pixel(xx0, y, color);
            img.put_pixel(xx1, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut img = RgbImage::new(20, 20);
        let region = Region { x: 2, y: 3, width: 10, height: 8, area: 80 };
        draw_region(&mut img, &region, Rgb([255, 0, 0]), 2);

        assert_eq!(img.get_pixel(2, 3).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(11, 10).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(3, 4).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(6, 6).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(12, 3).0, [0, 0, 0]);
    }

    #[test]
    fn region_past_edge_is_clipped() {
        let mut img = RgbImage::new(10, 10);
        let region = Region { x: 5, y: 5, width: 20, height: 20, area: 400 };
        draw_region(&mut img, &region, Rgb([0, 255, 0]), 3);
        assert_eq!(img.get_pixel(9, 9).0, [0, 255, 0]);
    }
}
