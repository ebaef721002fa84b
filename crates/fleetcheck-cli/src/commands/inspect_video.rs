use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fleetcheck_core::inspection::{InspectionConfig, Inspector};

use crate::progress::BarReporter;
use crate::summary::print_session;

#[derive(Args)]
pub struct InspectVideoArgs {
    /// Vehicle identifier (licence plate)
    #[arg(long)]
    pub vehicle: String,

    /// Name of the person performing the inspection
    #[arg(long)]
    pub inspector: String,

    /// Reference walk-around video
    pub reference: PathBuf,

    /// Candidate walk-around video
    pub candidate: PathBuf,

    /// Changed-pixel count the best pair must exceed
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Do not write a Markdown report
    #[arg(long)]
    pub no_report: bool,
}

pub fn run(args: &InspectVideoArgs, mut config: InspectionConfig) -> Result<()> {
    if let Some(threshold) = args.threshold {
        config.video.threshold = threshold;
    }
    if args.no_report {
        config.write_report = false;
    }

    let inspector = Inspector::open(config)?;
    let reporter = BarReporter::new();
    let session = inspector.inspect_video(
        &args.vehicle,
        &args.inspector,
        &args.reference,
        &args.candidate,
        &reporter,
    )?;
    print_session(&session);

    Ok(())
}
