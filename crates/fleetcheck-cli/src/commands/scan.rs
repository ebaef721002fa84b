use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fleetcheck_core::inspection::InspectionConfig;
use fleetcheck_core::io::{save_capture, save_mask};
use fleetcheck_core::pipeline::compare_files;
use tracing::info;

use crate::progress::BarReporter;
use crate::summary::print_regions;

#[derive(Args)]
pub struct ScanArgs {
    /// Reference video (SER, GIF or image directory)
    pub reference: PathBuf,

    /// Candidate video
    pub candidate: PathBuf,

    /// Changed-pixel count the best pair must exceed
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Per-pixel change threshold (0-255)
    #[arg(long)]
    pub sensitivity: Option<u8>,

    /// Write the best candidate frame here
    #[arg(long)]
    pub best_frame: Option<PathBuf>,

    /// Write the best pair's change mask here
    #[arg(long)]
    pub best_mask: Option<PathBuf>,

    /// Drop the best frame and mask when no damage is found
    #[arg(long)]
    pub discard_evidence: bool,
}

pub fn run(args: &ScanArgs, config: &InspectionConfig) -> Result<()> {
    let mut video = config.video.clone();
    if let Some(threshold) = args.threshold {
        video.threshold = threshold;
    }
    if let Some(sensitivity) = args.sensitivity {
        video.difference.sensitivity = sensitivity;
    }
    if args.discard_evidence {
        video.retain_evidence = false;
    }

    info!(
        reference = %args.reference.display(),
        candidate = %args.candidate.display(),
        threshold = video.threshold,
        "Scanning videos"
    );
    let reporter = BarReporter::new();
    let result = compare_files(&args.reference, &args.candidate, &video, &reporter)?;

    let verdict = if result.damage_detected { "DAMAGE DETECTED" } else { "no damage" };
    println!("Verdict:         {verdict}");
    println!(
        "Max score:       {} (threshold {})",
        result.max_difference_score, result.threshold
    );
    println!("Pairs compared:  {}", result.pairs_compared);
    if let Some(index) = result.best_frame_index {
        println!("Best frame:      {index}");
    }
    if result.best_mask.is_some() {
        print_regions(&result.best_regions);
    }

    if let Some(ref path) = args.best_frame {
        match result.best_annotated.as_ref().or(result.best_frame.as_ref()) {
            Some(frame) => {
                save_capture(frame, path)?;
                println!("\nBest frame saved to {}", path.display());
            }
            None => println!("\nNo best frame retained, {} not written", path.display()),
        }
    }
    if let Some(ref path) = args.best_mask {
        if let Some(mask) = &result.best_mask {
            save_mask(mask, path)?;
            println!("Best mask saved to {}", path.display());
        }
    }

    Ok(())
}
