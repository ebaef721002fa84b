use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::frame::{Capture, Region};
use crate::pipeline::{Angle, AngleResult, Severity, VideoComparisonResult};

/// A new capture of one angle, with the operator's remarks.
#[derive(Clone, Debug)]
pub struct AngleCapture {
    pub angle: Angle,
    pub capture: Capture,
    pub note: String,
    pub severity: Severity,
}

impl AngleCapture {
    pub fn new(angle: Angle, capture: Capture) -> Self {
        Self {
            angle,
            capture,
            note: String::new(),
            severity: Severity::default(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Everything needed to run a photo inspection.
#[derive(Clone, Debug)]
pub struct InspectionRequest {
    pub vehicle_id: String,
    pub inspector: String,
    pub date: NaiveDateTime,
    pub captures: Vec<AngleCapture>,
}

impl InspectionRequest {
    /// Request dated now, in local time.
    pub fn new(vehicle_id: impl Into<String>, inspector: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            inspector: inspector.into(),
            date: Local::now().naive_local(),
            captures: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = date;
        self
    }

    pub fn with_capture(mut self, capture: AngleCapture) -> Self {
        self.captures.push(capture);
        self
    }
}

/// Video scan outcome, with the evidence images written to disk.
#[derive(Clone, Debug)]
pub struct VideoFindings {
    pub damage_detected: bool,
    pub max_difference_score: usize,
    pub threshold: usize,
    pub pairs_compared: usize,
    pub best_frame_index: Option<usize>,
    pub regions: Vec<Region>,
    pub best_frame_path: Option<PathBuf>,
    pub best_mask_path: Option<PathBuf>,
    pub best_annotated_path: Option<PathBuf>,
}

impl VideoFindings {
    pub fn from_result(result: &VideoComparisonResult) -> Self {
        Self {
            damage_detected: result.damage_detected,
            max_difference_score: result.max_difference_score,
            threshold: result.threshold,
            pairs_compared: result.pairs_compared,
            best_frame_index: result.best_frame_index,
            regions: result.best_regions.clone(),
            best_frame_path: None,
            best_mask_path: None,
            best_annotated_path: None,
        }
    }

    /// Region count when damage was declared, 0 otherwise.
    pub fn damage_points(&self) -> usize {
        if self.damage_detected { self.regions.len() } else { 0 }
    }
}

#[derive(Clone, Debug)]
pub enum Findings {
    Angles(Vec<AngleResult>),
    Video(VideoFindings),
}

/// A completed inspection.
#[derive(Clone, Debug)]
pub struct InspectionSession {
    pub vehicle_id: String,
    pub inspector: String,
    pub date: NaiveDateTime,
    pub findings: Findings,
    pub report_path: Option<PathBuf>,
}

impl InspectionSession {
    pub fn damage_points(&self) -> usize {
        match &self.findings {
            Findings::Angles(results) => results.iter().map(|r| r.score).sum(),
            Findings::Video(video) => video.damage_points(),
        }
    }

    pub fn is_damaged(&self) -> bool {
        match &self.findings {
            Findings::Angles(results) => results.iter().any(|r| r.status.is_changed()),
            Findings::Video(video) => video.damage_detected,
        }
    }

    pub fn angle(&self, angle: Angle) -> Option<&AngleResult> {
        match &self.findings {
            Findings::Angles(results) => results.iter().find(|r| r.angle == angle),
            Findings::Video(_) => None,
        }
    }
}
