use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIDEO_DAMAGE_THRESHOLD, DEFAULT_VIDEO_SENSITIVITY};
use crate::detection::{DifferenceConfig, NormalizeConfig, RegionConfig};
use crate::error::Result;

/// Settings for comparing one reference image with one new image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PairConfig {
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub difference: DifferenceConfig,
    #[serde(default)]
    pub regions: RegionConfig,
}

impl PairConfig {
    pub fn validate(&self) -> Result<()> {
        self.normalize.validate()?;
        self.difference.validate()
    }
}

/// Settings for scanning two videos frame pair by frame pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoScanConfig {
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default = "default_video_difference")]
    pub difference: DifferenceConfig,
    /// Used to locate regions in the best pair for reporting.
    #[serde(default)]
    pub regions: RegionConfig,
    /// Changed-pixel count the best pair must exceed to declare damage.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Keep the best frame and mask even when no damage is declared.
    #[serde(default = "default_true")]
    pub retain_evidence: bool,
}

fn default_video_difference() -> DifferenceConfig {
    DifferenceConfig::with_sensitivity(DEFAULT_VIDEO_SENSITIVITY)
}
fn default_threshold() -> usize {
    DEFAULT_VIDEO_DAMAGE_THRESHOLD
}
fn default_true() -> bool {
    true
}

impl Default for VideoScanConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            difference: default_video_difference(),
            regions: RegionConfig::default(),
            threshold: DEFAULT_VIDEO_DAMAGE_THRESHOLD,
            retain_evidence: true,
        }
    }
}

impl VideoScanConfig {
    pub fn validate(&self) -> Result<()> {
        self.normalize.validate()?;
        self.difference.validate()
    }
}
