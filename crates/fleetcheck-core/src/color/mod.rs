pub mod ycbcr;

pub use ycbcr::{rgb_to_ycbcr, ycbcr_to_rgb, YCbCrPlanes};
