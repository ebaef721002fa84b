use ndarray::Zip;

use crate::error::{InspectError, Result};
use crate::filters::gaussian_blur::gaussian_blur_u8;
use crate::frame::{ChangeMask, NormalizedFrame};

use super::config::DifferenceConfig;

/// Classify each pixel of two same-sized frames as changed or unchanged.
///
/// Pipeline: intensity -> Gaussian smoothing -> absolute difference ->
/// threshold. A pixel is changed when its smoothed intensity differs by at
/// least `config.sensitivity`.
pub fn diff(a: &NormalizedFrame, b: &NormalizedFrame, config: &DifferenceConfig) -> Result<ChangeMask> {
    if a.pixels.dimensions() != b.pixels.dimensions() {
        return Err(InspectError::DimensionMismatch {
            reference_width: a.width(),
            reference_height: a.height(),
            width: b.width(),
            height: b.height(),
        });
    }

    let smooth_a = gaussian_blur_u8(&a.intensity(), config.blur_kernel);
    let smooth_b = gaussian_blur_u8(&b.intensity(), config.blur_kernel);

    let threshold = config.sensitivity;
    let data = Zip::from(&smooth_a)
        .and(&smooth_b)
        .map_collect(|&pa, &pb| pa.abs_diff(pb) >= threshold);

    Ok(ChangeMask::new(data))
}
