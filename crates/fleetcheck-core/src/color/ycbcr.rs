use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::consts::{CHROMA_OFFSET, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// An RGB image split into luminance and chrominance planes (ITU-R BT.601, full range).
///
/// Luminance is quantized to 8 bits so it can be histogram-equalized; the
/// chroma planes keep full precision so a round trip does not drift colors.
#[derive(Clone, Debug)]
pub struct YCbCrPlanes {
    /// Shape = (height, width).
    pub luma: Array2<u8>,
    pub cb: Array2<f32>,
    pub cr: Array2<f32>,
}

/// Split an RGB image into Y, Cb and Cr planes.
pub fn rgb_to_ycbcr(img: &RgbImage) -> YCbCrPlanes {
    let (w, h) = img.dimensions();
    let (w, h) = (w as usize, h as usize);
    let mut luma = Array2::<u8>::zeros((h, w));
    let mut cb = Array2::<f32>::zeros((h, w));
    let mut cr = Array2::<f32>::zeros((h, w));

    for (x, y, px) in img.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        let r = px.0[0] as f32;
        let g = px.0[1] as f32;
        let b = px.0[2] as f32;

        let lum = LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b;
        luma[[row, col]] = lum.round().clamp(0.0, 255.0) as u8;
        cb[[row, col]] = (b - lum) / (2.0 * (1.0 - LUMINANCE_B)) + CHROMA_OFFSET;
        cr[[row, col]] = (r - lum) / (2.0 * (1.0 - LUMINANCE_R)) + CHROMA_OFFSET;
    }

    YCbCrPlanes { luma, cb, cr }
}

/// Recombine Y, Cb and Cr planes into an RGB image.
pub fn ycbcr_to_rgb(planes: &YCbCrPlanes) -> RgbImage {
    let (h, w) = planes.luma.dim();
    let mut img = RgbImage::new(w as u32, h as u32);

    for row in 0..h {
        for col in 0..w {
            let y = planes.luma[[row, col]] as f32;
            let cb = planes.cb[[row, col]] - CHROMA_OFFSET;
            let cr = planes.cr[[row, col]] - CHROMA_OFFSET;

            let r = y + 2.0 * (1.0 - LUMINANCE_R) * cr;
            let b = y + 2.0 * (1.0 - LUMINANCE_B) * cb;
            let g = (y - LUMINANCE_R * r - LUMINANCE_B * b) / LUMINANCE_G;

            img.put_pixel(col as u32, row as u32, Rgb([to_u8(r), to_u8(g), to_u8(b)]));
        }
    }

    img
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_has_neutral_chroma() {
        let img = RgbImage::from_pixel(3, 2, Rgb([90, 90, 90]));
        let planes = rgb_to_ycbcr(&img);
        assert!(planes.luma.iter().all(|&v| v == 90));
        assert!(planes.cb.iter().all(|&v| (v - 128.0).abs() < 1e-3));
        assert!(planes.cr.iter().all(|&v| (v - 128.0).abs() < 1e-3));
    }

    #[test]
    fn round_trip_is_close() {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 15) as u8, (y * 15) as u8, 200]));
        let back = ycbcr_to_rgb(&rgb_to_ycbcr(&img));
        for (a, b) in img.pixels().zip(back.pixels()) {
            for c in 0..3 {
                assert!((a.0[c] as i32 - b.0[c] as i32).abs() <= 2, "{a:?} vs {b:?}");
            }
        }
    }
}
