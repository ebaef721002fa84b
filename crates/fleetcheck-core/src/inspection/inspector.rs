use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Local, NaiveDateTime};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{InspectError, Result};
use crate::io::{save_capture, save_mask};
use crate::pipeline::{self, AngleResult, PipelineStage, ProgressReporter};

use super::annotations::DirectoryAnnotationSink;
use super::config::InspectionConfig;
use super::history::{HistoryLog, HistoryRecord, InspectionKind, Overall};
use super::report::write_report;
use super::session::{Findings, InspectionRequest, InspectionSession, VideoFindings};
use super::store::{normalize_vehicle_id, FsReferenceStore, ReferenceKey, ReferenceStore};

/// Runs inspection sessions against a reference store and records them.
pub struct Inspector<S: ReferenceStore> {
    config: InspectionConfig,
    store: S,
    history: HistoryLog,
}

impl Inspector<FsReferenceStore> {
    /// Inspector keeping its references under `<data_dir>/references`.
    pub fn open(config: InspectionConfig) -> Result<Self> {
        let store = FsReferenceStore::new(config.references_dir());
        Self::new(config, store)
    }
}

impl<S: ReferenceStore> Inspector<S> {
    pub fn new(config: InspectionConfig, store: S) -> Result<Self> {
        config.validate()?;
        let history = HistoryLog::new(config.history_path());
        Ok(Self {
            config,
            store,
            history,
        })
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Compare every supplied angle against its stored reference.
    ///
    /// Annotated captures go to `<data_dir>/annotated/<VEHICLE>_<stamp>/`.
    /// References, history and report are only written once every angle has
    /// been analyzed successfully; a failing angle leaves them untouched.
    pub fn inspect(
        &self,
        request: &InspectionRequest,
        reporter: &dyn ProgressReporter,
    ) -> Result<InspectionSession> {
        let vehicle_id = normalize_vehicle_id(&request.vehicle_id)?;
        self.check_angles(request)?;

        info!(
            vehicle = %vehicle_id,
            inspector = %request.inspector,
            angles = request.captures.len(),
            "Starting photo inspection"
        );

        let keys = request
            .captures
            .iter()
            .map(|c| ReferenceKey::new(&vehicle_id, c.angle))
            .collect::<Result<Vec<_>>>()?;
        let sink = DirectoryAnnotationSink::new(
            self.config
                .annotated_dir()
                .join(session_dir_name(&vehicle_id, request.date)),
        );

        reporter.begin_stage(PipelineStage::AnalyzingAngles, Some(request.captures.len()));
        let done = AtomicUsize::new(0);
        let results = request
            .captures
            .par_iter()
            .zip(keys.par_iter())
            .map(|(capture, key)| {
                let reference = self.store.get(key)?;
                let result = pipeline::analyze(
                    reference.as_ref(),
                    &capture.capture,
                    capture.angle,
                    &vehicle_id,
                    &self.config.pair,
                    &sink,
                )?;
                reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                Ok(result
                    .with_note(capture.note.clone())
                    .with_severity(capture.severity))
            })
            .collect::<Result<Vec<AngleResult>>>()?;
        reporter.finish_stage();

        for result in &results {
            info!(angle = result.angle.as_str(), status = %result.status, "Angle analyzed");
        }

        reporter.begin_stage(PipelineStage::StoringReferences, Some(keys.len()));
        for (i, (capture, key)) in request.captures.iter().zip(&keys).enumerate() {
            self.store.put(key, &capture.capture)?;
            reporter.advance(i + 1);
        }
        reporter.finish_stage();

        let session = InspectionSession {
            vehicle_id,
            inspector: request.inspector.clone(),
            date: request.date,
            findings: Findings::Angles(results),
            report_path: None,
        };
        self.record(session, InspectionKind::Photo, reporter)
    }

    /// Scan a candidate video against a reference video, dated now.
    pub fn inspect_video(
        &self,
        vehicle_id: &str,
        inspector: &str,
        reference: &Path,
        candidate: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<InspectionSession> {
        let date = Local::now().naive_local();
        self.inspect_video_at(vehicle_id, inspector, date, reference, candidate, reporter)
    }

    /// Scan a candidate video against a reference video.
    ///
    /// The best frame, its mask and its annotated copy are written under
    /// `<data_dir>/evidence/<VEHICLE>_<stamp>/`.
    pub fn inspect_video_at(
        &self,
        vehicle_id: &str,
        inspector: &str,
        date: NaiveDateTime,
        reference: &Path,
        candidate: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<InspectionSession> {
        let vehicle_id = normalize_vehicle_id(vehicle_id)?;
        info!(
            vehicle = %vehicle_id,
            reference = %reference.display(),
            candidate = %candidate.display(),
            "Starting video inspection"
        );

        let result = pipeline::compare_files(reference, candidate, &self.config.video, reporter)?;
        if result.pairs_compared == 0 {
            warn!(vehicle = %vehicle_id, "No frame pairs to compare");
        }

        let mut findings = VideoFindings::from_result(&result);
        let evidence = self
            .config
            .evidence_dir()
            .join(session_dir_name(&vehicle_id, date));
        if let Some(frame) = &result.best_frame {
            let path = evidence.join("best_frame.png");
            save_capture(frame, &path)?;
            findings.best_frame_path = Some(path);
        }
        if let Some(mask) = &result.best_mask {
            let path = evidence.join("best_mask.png");
            save_mask(mask, &path)?;
            findings.best_mask_path = Some(path);
        }
        if let Some(annotated) = &result.best_annotated {
            let path = evidence.join("best_annotated.png");
            save_capture(annotated, &path)?;
            findings.best_annotated_path = Some(path);
        }

        info!(
            vehicle = %vehicle_id,
            damage = findings.damage_detected,
            score = findings.max_difference_score,
            threshold = findings.threshold,
            "Video scan complete"
        );

        let session = InspectionSession {
            vehicle_id,
            inspector: inspector.to_string(),
            date,
            findings: Findings::Video(findings),
            report_path: None,
        };
        self.record(session, InspectionKind::Video, reporter)
    }

    fn check_angles(&self, request: &InspectionRequest) -> Result<()> {
        let mut seen = HashSet::new();
        for capture in &request.captures {
            if !seen.insert(capture.angle) {
                return Err(InspectError::InvalidConfig(format!(
                    "angle '{}' supplied more than once",
                    capture.angle.as_str()
                )));
            }
        }

        let missing: Vec<String> = self
            .config
            .required_angles
            .iter()
            .filter(|a| !seen.contains(*a))
            .map(|a| a.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(InspectError::IncompleteInspection { missing });
        }
        if request.captures.is_empty() {
            return Err(InspectError::IncompleteInspection {
                missing: vec!["any angle".into()],
            });
        }
        Ok(())
    }

    fn record(
        &self,
        mut session: InspectionSession,
        kind: InspectionKind,
        reporter: &dyn ProgressReporter,
    ) -> Result<InspectionSession> {
        let mut record = HistoryRecord::new(
            session.date,
            session.vehicle_id.clone(),
            session.inspector.clone(),
            kind,
            session.damage_points(),
        );
        if session.is_damaged() {
            record.overall = Overall::Damaged;
        }
        self.history.append(&record)?;

        if self.config.write_report {
            reporter.begin_stage(PipelineStage::WritingReport, Some(1));
            session.report_path = Some(write_report(&session, &self.config.reports_dir())?);
            reporter.advance(1);
            reporter.finish_stage();
        }

        info!(
            vehicle = %session.vehicle_id,
            overall = %record.overall,
            damage_points = record.damage_points,
            "Inspection recorded"
        );
        Ok(session)
    }
}

/// Per-session output directory name, e.g. `KA01_20260302-103000`.
fn session_dir_name(vehicle_id: &str, date: NaiveDateTime) -> String {
    format!("{vehicle_id}_{}", date.format("%Y%m%d-%H%M%S"))
}
