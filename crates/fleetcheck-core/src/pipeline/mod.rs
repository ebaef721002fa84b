pub mod config;
pub mod pair;
mod types;
pub mod video;

pub use config::{PairConfig, VideoScanConfig};
pub use pair::{analyze, compare_captures, PairComparison};
pub use types::{
    Angle, AngleResult, AngleStatus, AnnotationSink, NoOpReporter, PipelineStage,
    ProgressReporter, Severity, VideoComparisonResult,
};
pub use video::{compare, compare_files, MaxScoreTracker};
