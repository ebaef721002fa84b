pub mod clahe;
pub mod gaussian_blur;

pub use clahe::clahe;
pub use gaussian_blur::{gaussian_blur_array, gaussian_blur_u8, smoothing_kernel};
