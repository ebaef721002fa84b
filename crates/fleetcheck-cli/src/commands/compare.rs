use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fleetcheck_core::inspection::InspectionConfig;
use fleetcheck_core::io::{load_capture, save_capture, save_mask};
use fleetcheck_core::pipeline::compare_captures;
use tracing::info;

use crate::summary::print_regions;

#[derive(Args)]
pub struct CompareArgs {
    /// Reference image
    pub reference: PathBuf,

    /// New image of the same view
    pub new: PathBuf,

    /// Per-pixel change threshold (0-255)
    #[arg(long)]
    pub sensitivity: Option<u8>,

    /// Minimum region area in pixels
    #[arg(long)]
    pub min_area: Option<usize>,

    /// Skip illumination normalization
    #[arg(long)]
    pub no_normalize: bool,

    /// Write the annotated image here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the change mask here
    #[arg(long)]
    pub mask: Option<PathBuf>,
}

pub fn run(args: &CompareArgs, config: &InspectionConfig) -> Result<()> {
    let mut pair = config.pair.clone();
    if let Some(sensitivity) = args.sensitivity {
        pair.difference.sensitivity = sensitivity;
    }
    if let Some(min_area) = args.min_area {
        pair.regions.min_area = min_area;
    }
    if args.no_normalize {
        pair.normalize.enabled = false;
    }
    pair.validate()?;

    let reference = load_capture(&args.reference)
        .with_context(|| format!("Failed to read {}", args.reference.display()))?;
    let new = load_capture(&args.new)
        .with_context(|| format!("Failed to read {}", args.new.display()))?;
    info!(
        reference = %args.reference.display(),
        new = %args.new.display(),
        sensitivity = pair.difference.sensitivity,
        "Comparing images"
    );

    let comparison = compare_captures(&reference, &new, &pair)?;
    println!("Status:          {}", comparison.status());
    println!("Changed pixels:  {}", comparison.mask.changed_pixels());
    print_regions(&comparison.regions);

    if let Some(ref path) = args.output {
        match &comparison.annotated {
            Some(annotated) => {
                save_capture(annotated, path)?;
                println!("\nAnnotated image saved to {}", path.display());
            }
            None => println!("\nNo regions to annotate, {} not written", path.display()),
        }
    }
    if let Some(ref path) = args.mask {
        save_mask(&comparison.mask, path)?;
        println!("Change mask saved to {}", path.display());
    }

    Ok(())
}
