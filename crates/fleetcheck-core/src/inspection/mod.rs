//! Inspection sessions: reference storage, annotation output, history and
//! reports around the comparison pipeline.

pub mod annotations;
pub mod config;
pub mod history;
pub mod inspector;
pub mod report;
pub mod session;
pub mod store;

pub use annotations::{DirectoryAnnotationSink, MemoryAnnotationSink};
pub use config::InspectionConfig;
pub use history::{HistoryLog, HistoryRecord, InspectionKind, Overall};
pub use inspector::Inspector;
pub use report::{render_report, report_file_name, write_report, Report};
pub use session::{AngleCapture, Findings, InspectionRequest, InspectionSession, VideoFindings};
pub use store::{
    normalize_vehicle_id, FsReferenceStore, MemoryReferenceStore, ReferenceKey, ReferenceStore,
};
