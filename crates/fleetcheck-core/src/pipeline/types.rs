use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InspectError, Result};
use crate::frame::{Capture, ChangeMask, Region};

/// One of the fixed vehicle-facing directions inspected per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Angle {
    Front,
    Rear,
    Right,
    Left,
}

impl Angle {
    pub const ALL: [Angle; 4] = [Angle::Front, Angle::Rear, Angle::Right, Angle::Left];

    /// Lowercase identifier, used for file names and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Rear => "rear",
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "Front"),
            Self::Rear => write!(f, "Rear"),
            Self::Right => write!(f, "Right Side"),
            Self::Left => write!(f, "Left Side"),
        }
    }
}

impl FromStr for Angle {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "rear" | "back" => Ok(Self::Rear),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            other => Err(InspectError::InvalidConfig(format!("unknown angle: {other}"))),
        }
    }
}

/// Damage level declared by the operator. Recorded verbatim, never computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Severity {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(InspectError::InvalidConfig(format!("unknown severity: {other}"))),
        }
    }
}

/// Outcome of comparing one angle against its reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleStatus {
    /// No reference existed; the capture becomes the baseline.
    FirstRecord,
    /// Compared, no region survived filtering.
    Clean,
    /// Compared, `regions` regions survived filtering.
    Changed { regions: usize },
}

impl AngleStatus {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

impl std::fmt::Display for AngleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstRecord => write!(f, "First record"),
            Self::Clean => write!(f, "Clean"),
            Self::Changed { regions: 1 } => write!(f, "Changed (1 region)"),
            Self::Changed { regions } => write!(f, "Changed ({regions} regions)"),
        }
    }
}

/// Per-angle inspection result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    pub angle: Angle,
    pub status: AngleStatus,
    /// Where the annotation sink stored the boxed capture, for `Changed` results.
    pub annotated_path: Option<PathBuf>,
    /// Number of regions found.
    pub score: usize,
    pub regions: Vec<Region>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub severity: Severity,
}

impl AngleResult {
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Outcome of scanning a candidate video against a reference video.
#[derive(Clone, Debug)]
pub struct VideoComparisonResult {
    pub damage_detected: bool,
    /// Changed-pixel count of the best pair; 0 when no pair was compared.
    pub max_difference_score: usize,
    /// Threshold the score was checked against.
    pub threshold: usize,
    pub pairs_compared: usize,
    /// Read-order index of the best pair.
    pub best_frame_index: Option<usize>,
    /// Candidate frame of the best pair.
    pub best_frame: Option<Capture>,
    pub best_mask: Option<ChangeMask>,
    /// Regions of the best mask that pass the area filter.
    pub best_regions: Vec<Region>,
    /// Best frame with `best_regions` boxed, when there are any.
    pub best_annotated: Option<Capture>,
}

impl VideoComparisonResult {
    /// Result for two sources that yielded no frame pair.
    pub fn empty(threshold: usize) -> Self {
        Self {
            damage_detected: false,
            max_difference_score: 0,
            threshold,
            pairs_compared: 0,
            best_frame_index: None,
            best_frame: None,
            best_mask: None,
            best_regions: Vec::new(),
            best_annotated: None,
        }
    }
}

/// Destination for annotated captures produced during analysis.
///
/// Returns the location the capture was stored under so results can refer to it.
pub trait AnnotationSink: Send + Sync {
    fn store(&self, name: &str, capture: &Capture) -> Result<PathBuf>;
}

/// Processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    ScanningFrames,
    ExtractingRegions,
    AnalyzingAngles,
    StoringReferences,
    WritingReport,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScanningFrames => write!(f, "Scanning frames"),
            Self::ExtractingRegions => write!(f, "Extracting regions"),
            Self::AnalyzingAngles => write!(f, "Analyzing angles"),
            Self::StoringReferences => write!(f, "Storing references"),
            Self::WritingReport => write!(f, "Writing report"),
        }
    }
}

/// Thread-safe progress reporting.
///
/// Implementors can use this to drive progress bars or any other UI
/// feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., frame pairs), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
