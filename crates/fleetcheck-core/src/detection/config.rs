use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLUR_KERNEL, DEFAULT_BOX_COLOR, DEFAULT_BOX_THICKNESS, DEFAULT_CLAHE_CLIP_LIMIT,
    DEFAULT_CLAHE_TILE_GRID, DEFAULT_MIN_REGION_AREA, DEFAULT_PAIR_SENSITIVITY,
};
use crate::error::{InspectError, Result};

/// Illumination correction applied to each capture before differencing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Disable to difference raw captures.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of CLAHE tiles along each axis.
    #[serde(default = "default_tile_grid")]
    pub tile_grid: usize,
    /// CLAHE clip limit, relative to a flat histogram.
    #[serde(default = "default_clip_limit")]
    pub clip_limit: f32,
}

fn default_true() -> bool {
    true
}
fn default_tile_grid() -> usize {
    DEFAULT_CLAHE_TILE_GRID
}
fn default_clip_limit() -> f32 {
    DEFAULT_CLAHE_CLIP_LIMIT
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tile_grid: DEFAULT_CLAHE_TILE_GRID,
            clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tile_grid == 0 {
            return Err(InspectError::InvalidConfig("tile_grid must be > 0".into()));
        }
        if self.clip_limit.is_nan() || self.clip_limit <= 0.0 {
            return Err(InspectError::InvalidConfig(format!(
                "clip_limit must be > 0, got {}",
                self.clip_limit
            )));
        }
        Ok(())
    }
}

/// Per-pixel change classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifferenceConfig {
    /// Absolute intensity difference at or above which a pixel counts as changed.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u8,
    /// Odd size of the square smoothing kernel.
    #[serde(default = "default_blur_kernel")]
    pub blur_kernel: usize,
}

fn default_sensitivity() -> u8 {
    DEFAULT_PAIR_SENSITIVITY
}
fn default_blur_kernel() -> usize {
    DEFAULT_BLUR_KERNEL
}

impl Default for DifferenceConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_PAIR_SENSITIVITY,
            blur_kernel: DEFAULT_BLUR_KERNEL,
        }
    }
}

impl DifferenceConfig {
    pub fn with_sensitivity(sensitivity: u8) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(InspectError::InvalidConfig(format!(
                "blur_kernel must be odd, got {}",
                self.blur_kernel
            )));
        }
        Ok(())
    }
}

/// Region filtering and overlay style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Regions must enclose strictly more pixels than this.
    #[serde(default = "default_min_area")]
    pub min_area: usize,
    /// Stroke width of drawn boxes, in pixels.
    #[serde(default = "default_box_thickness")]
    pub box_thickness: u32,
    /// Stroke color of drawn boxes (RGB).
    #[serde(default = "default_box_color")]
    pub box_color: [u8; 3],
}

fn default_min_area() -> usize {
    DEFAULT_MIN_REGION_AREA
}
fn default_box_thickness() -> u32 {
    DEFAULT_BOX_THICKNESS
}
fn default_box_color() -> [u8; 3] {
    DEFAULT_BOX_COLOR
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_REGION_AREA,
            box_thickness: DEFAULT_BOX_THICKNESS,
            box_color: DEFAULT_BOX_COLOR,
        }
    }
}
