pub mod annotate;
pub mod components;
pub mod config;
pub mod difference;
pub mod normalize;
pub mod regions;

pub use config::{DifferenceConfig, NormalizeConfig, RegionConfig};
pub use difference::diff;
pub use normalize::normalize;
pub use regions::{extract_regions, find_regions, RegionExtraction};
