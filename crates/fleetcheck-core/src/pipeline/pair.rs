use crate::detection::{diff, extract_regions, normalize};
use crate::error::Result;
use crate::frame::{Capture, ChangeMask, Region};

use super::config::PairConfig;
use super::types::{Angle, AngleResult, AngleStatus, AnnotationSink, Severity};

/// Full outcome of comparing a new capture against a reference.
#[derive(Clone, Debug)]
pub struct PairComparison {
    pub mask: ChangeMask,
    /// Largest first.
    pub regions: Vec<Region>,
    /// The resized new capture with regions boxed; `None` when no region survived.
    pub annotated: Option<Capture>,
}

impl PairComparison {
    pub fn status(&self) -> AngleStatus {
        if self.regions.is_empty() {
            AngleStatus::Clean
        } else {
            AngleStatus::Changed {
                regions: self.regions.len(),
            }
        }
    }
}

/// Compare `new` against `reference`.
///
/// `new` is resized to the reference dimensions; the reference is never
/// resized. Fails with `DimensionMismatch` when either capture is empty.
pub fn compare_captures(reference: &Capture, new: &Capture, config: &PairConfig) -> Result<PairComparison> {
    let (w, h) = reference.dimensions();
    let aligned = new.resized_to(w, h)?;

    let norm_ref = normalize(reference, &config.normalize);
    let norm_new = normalize(&aligned, &config.normalize);
    let mask = diff(&norm_ref, &norm_new, &config.difference)?;

    let extraction = extract_regions(&mask, &aligned, &config.regions);
    Ok(PairComparison {
        mask,
        regions: extraction.regions,
        annotated: extraction.annotated,
    })
}

/// Name under which the annotated capture of an angle is handed to the sink.
pub fn annotation_name(angle: Angle, vehicle_id: &str) -> String {
    format!("annotated_{}_{}", angle.as_str(), vehicle_id)
}

/// Inspect one angle of a vehicle.
///
/// Without a reference the result is `FirstRecord` with score 0 and nothing
/// is annotated; the caller decides whether `new` becomes the reference.
/// Otherwise the score is the number of regions found and a `Changed` result
/// carries the path the sink stored the annotated capture under.
pub fn analyze(
    reference: Option<&Capture>,
    new: &Capture,
    angle: Angle,
    vehicle_id: &str,
    config: &PairConfig,
    sink: &dyn AnnotationSink,
) -> Result<AngleResult> {
    let Some(reference) = reference else {
        return Ok(AngleResult {
            angle,
            status: AngleStatus::FirstRecord,
            annotated_path: None,
            score: 0,
            regions: Vec::new(),
            note: String::new(),
            severity: Severity::default(),
        });
    };

    let comparison = compare_captures(reference, new, config)?;
    let status = comparison.status();

    let annotated_path = match &comparison.annotated {
        Some(annotated) => Some(sink.store(&annotation_name(angle, vehicle_id), annotated)?),
        None => None,
    };

    Ok(AngleResult {
        angle,
        status,
        annotated_path,
        score: comparison.regions.len(),
        regions: comparison.regions,
        note: String::new(),
        severity: Severity::default(),
    })
}
