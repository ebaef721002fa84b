use std::path::Path;

use crate::detection::{diff, extract_regions, normalize};
use crate::error::Result;
use crate::frame::{Capture, ChangeMask};
use crate::io::video::open_video;

use super::config::VideoScanConfig;
use super::types::{PipelineStage, ProgressReporter, VideoComparisonResult};

/// The frame pair with the highest score seen so far.
#[derive(Clone, Debug)]
pub struct TrackedPair {
    pub index: usize,
    pub score: usize,
    pub frame: Capture,
    pub mask: ChangeMask,
}

/// Running-maximum reducer over scored frame pairs.
///
/// Only a strictly greater score replaces the tracked pair, so the earliest
/// pair wins ties. The very first pair is always tracked.
#[derive(Debug, Default)]
pub struct MaxScoreTracker {
    best: Option<TrackedPair>,
}

impl MaxScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a pair. Returns true if it became the tracked maximum.
    pub fn observe(&mut self, index: usize, score: usize, frame: Capture, mask: ChangeMask) -> bool {
        let replace = match &self.best {
            Some(best) => score > best.score,
            None => true,
        };
        if replace {
            self.best = Some(TrackedPair {
                index,
                score,
                frame,
                mask,
            });
        }
        replace
    }

    /// Highest score observed, 0 before any pair.
    pub fn max_score(&self) -> usize {
        self.best.as_ref().map_or(0, |b| b.score)
    }

    pub fn best_index(&self) -> Option<usize> {
        self.best.as_ref().map(|b| b.index)
    }

    pub fn into_best(self) -> Option<TrackedPair> {
        self.best
    }
}

/// Score one frame pair: the candidate is resized to the reference, both are
/// normalized, and the score is the number of changed pixels.
///
/// Returns the score, the mask and the resized candidate frame.
pub fn score_pair(
    reference: &Capture,
    candidate: &Capture,
    config: &VideoScanConfig,
) -> Result<(usize, ChangeMask, Capture)> {
    let (w, h) = reference.dimensions();
    let aligned = candidate.resized_to(w, h)?;

    let norm_ref = normalize(reference, &config.normalize);
    let norm_cand = normalize(&aligned, &config.normalize);
    let mask = diff(&norm_ref, &norm_cand, &config.difference)?;

    Ok((mask.changed_pixels(), mask, aligned))
}

/// Scan two frame sequences pair by pair in read order.
///
/// Iteration stops as soon as either sequence is exhausted; a decode error
/// from either aborts the scan. Damage is declared when the best pair's
/// score exceeds `config.threshold`.
pub fn compare<R, C>(
    reference: R,
    candidate: C,
    config: &VideoScanConfig,
    reporter: &dyn ProgressReporter,
) -> Result<VideoComparisonResult>
where
    R: IntoIterator<Item = Result<Capture>>,
    C: IntoIterator<Item = Result<Capture>>,
{
    config.validate()?;

    let mut reference = reference.into_iter();
    let mut candidate = candidate.into_iter();
    let total = pair_count_hint(reference.size_hint(), candidate.size_hint());

    reporter.begin_stage(PipelineStage::ScanningFrames, total);
    let mut tracker = MaxScoreTracker::new();
    let mut pairs = 0usize;
    loop {
        let Some(ref_frame) = reference.next().transpose()? else {
            break;
        };
        let Some(cand_frame) = candidate.next().transpose()? else {
            break;
        };

        let (score, mask, aligned) = score_pair(&ref_frame, &cand_frame, config)?;
        tracker.observe(pairs, score, aligned, mask);
        pairs += 1;
        reporter.advance(pairs);
    }
    reporter.finish_stage();

    let max_score = tracker.max_score();
    let damage_detected = pairs > 0 && max_score > config.threshold;

    let mut result = VideoComparisonResult::empty(config.threshold);
    result.damage_detected = damage_detected;
    result.max_difference_score = max_score;
    result.pairs_compared = pairs;

    let keep = damage_detected || config.retain_evidence;
    if let Some(best) = tracker.into_best().filter(|_| keep) {
        reporter.begin_stage(PipelineStage::ExtractingRegions, Some(1));
        let extraction = extract_regions(&best.mask, &best.frame, &config.regions);
        reporter.advance(1);
        reporter.finish_stage();

        result.best_frame_index = Some(best.index);
        result.best_regions = extraction.regions;
        result.best_annotated = extraction.annotated;
        result.best_frame = Some(best.frame);
        result.best_mask = Some(best.mask);
    }

    Ok(result)
}

/// Open two video sources and scan them.
///
/// Both sources are opened before any frame is processed, so an unreadable
/// source fails with `VideoOpen` without partial work.
pub fn compare_files(
    reference: &Path,
    candidate: &Path,
    config: &VideoScanConfig,
    reporter: &dyn ProgressReporter,
) -> Result<VideoComparisonResult> {
    let reference = open_video(reference)?;
    let candidate = open_video(candidate)?;
    compare(reference, candidate, config, reporter)
}

fn pair_count_hint(a: (usize, Option<usize>), b: (usize, Option<usize>)) -> Option<usize> {
    match (a.1, b.1) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}
