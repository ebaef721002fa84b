use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::{BINOMIAL_KERNEL_5, PARALLEL_PIXEL_THRESHOLD};

/// 1D Gaussian taps for an odd `size`, normalized to sum to one.
///
/// Size 5 returns the binomial [1, 4, 6, 4, 1] / 16 kernel. Other sizes derive
/// sigma from the size as `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn smoothing_kernel(size: usize) -> Vec<f32> {
    if size == BINOMIAL_KERNEL_5.len() {
        return BINOMIAL_KERNEL_5.to_vec();
    }
    if size <= 1 {
        return vec![1.0];
    }
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    gaussian_kernel(size, sigma)
}

fn gaussian_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let radius = (size / 2) as f32;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Smooth an 8-bit plane with a separable `kernel_size` x `kernel_size` Gaussian.
///
/// Borders are replicated. The result is rounded back to 8 bits.
pub fn gaussian_blur_u8(data: &Array2<u8>, kernel_size: usize) -> Array2<u8> {
    let kernel = smoothing_kernel(kernel_size);
    let float = data.mapv(|v| v as f32);
    let blurred = gaussian_blur_array(&float, &kernel);
    blurred.mapv(|v| v.round().clamp(0.0, 255.0) as u8)
}

/// Apply a separable 1D kernel along rows, then columns.
pub fn gaussian_blur_array(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let row_pass = convolve_rows(data, kernel);
    let transposed = row_pass.t().as_standard_layout().into_owned();
    let col_pass = convolve_rows(&transposed, kernel);
    col_pass.t().as_standard_layout().into_owned()
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));
    if w == 0 {
        return result;
    }
    let radius = (kernel.len() / 2) as isize;

    let convolve_row = |row: usize, out: &mut [f32]| {
        for (col, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_col = (col as isize + ki as isize - radius).clamp(0, w as isize - 1) as usize;
                sum += data[[row, src_col]] * kv;
            }
            *slot = sum;
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                if let Some(slice) = out.as_slice_mut() {
                    convolve_row(row, slice);
                }
            });
    } else {
        for (row, mut out) in result.axis_iter_mut(Axis(0)).enumerate() {
            if let Some(slice) = out.as_slice_mut() {
                convolve_row(row, slice);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_are_normalized() {
        for size in [3, 5, 7, 9] {
            let k = smoothing_kernel(size);
            assert_eq!(k.len(), size);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "size {size}: {sum}");
        }
    }

    #[test]
    fn flat_plane_is_unchanged() {
        let data = Array2::<u8>::from_elem((12, 9), 77);
        let blurred = gaussian_blur_u8(&data, 5);
        assert!(blurred.iter().all(|&v| v == 77));
    }
}
