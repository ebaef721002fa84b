use crate::color::ycbcr::{rgb_to_ycbcr, ycbcr_to_rgb};
use crate::filters::clahe::clahe;
use crate::frame::{Capture, NormalizedFrame};

use super::config::NormalizeConfig;

/// Remove illumination and exposure variance from a capture.
///
/// Equalizes the luminance channel with CLAHE and leaves chroma untouched, so
/// two captures taken under different lighting difference on structure rather
/// than brightness. When normalization is disabled the pixels pass through.
pub fn normalize(capture: &Capture, config: &NormalizeConfig) -> NormalizedFrame {
    if !config.enabled || capture.is_empty() {
        return NormalizedFrame {
            pixels: capture.pixels.clone(),
        };
    }

    let mut planes = rgb_to_ycbcr(&capture.pixels);
    planes.luma = clahe(&planes.luma, config.tile_grid, config.clip_limit);

    NormalizedFrame {
        pixels: ycbcr_to_rgb(&planes),
    }
}
