use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{InspectError, Result};
use crate::pipeline::{Angle, PairConfig, VideoScanConfig};

/// Top-level settings for inspection sessions.
///
/// Everything the inspector writes lives under `data_dir`:
///
/// ```text
/// <data_dir>/references/<VEHICLE>/<angle>.png
/// <data_dir>/annotated/annotated_<angle>_<VEHICLE>.png
/// <data_dir>/evidence/<VEHICLE>_best_frame.png
/// <data_dir>/reports/Report_<VEHICLE>_<date>.md
/// <data_dir>/history.jsonl
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectionConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub pair: PairConfig,
    #[serde(default)]
    pub video: VideoScanConfig,
    /// Angles that must all be supplied for a photo inspection.
    #[serde(default = "default_required_angles")]
    pub required_angles: Vec<Angle>,
    #[serde(default = "default_true")]
    pub write_report: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("fleetcheck-data")
}
fn default_required_angles() -> Vec<Angle> {
    Angle::ALL.to_vec()
}
fn default_true() -> bool {
    true
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pair: PairConfig::default(),
            video: VideoScanConfig::default(),
            required_angles: default_required_angles(),
            write_report: true,
        }
    }
}

impl InspectionConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.pair.validate()?;
        self.video.validate()?;
        if self.data_dir.as_os_str().is_empty() {
            return Err(InspectError::InvalidConfig("data_dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn references_dir(&self) -> PathBuf {
        self.data_dir.join("references")
    }

    pub fn annotated_dir(&self) -> PathBuf {
        self.data_dir.join("annotated")
    }

    pub fn evidence_dir(&self) -> PathBuf {
        self.data_dir.join("evidence")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.jsonl")
    }
}
