use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use fleetcheck_core::inspection::{AngleCapture, InspectionConfig, InspectionRequest, Inspector};
use fleetcheck_core::io::load_capture;
use fleetcheck_core::pipeline::{Angle, Severity};

use crate::progress::BarReporter;
use crate::summary::print_session;

#[derive(Args)]
pub struct InspectArgs {
    /// Vehicle identifier (licence plate)
    #[arg(long)]
    pub vehicle: String,

    /// Name of the person performing the inspection
    #[arg(long)]
    pub inspector: String,

    /// Front view image
    #[arg(long)]
    pub front: Option<PathBuf>,

    /// Rear view image
    #[arg(long)]
    pub rear: Option<PathBuf>,

    /// Right side image
    #[arg(long)]
    pub right: Option<PathBuf>,

    /// Left side image
    #[arg(long)]
    pub left: Option<PathBuf>,

    /// Note for an angle, as angle=text (repeatable)
    #[arg(long = "note", value_name = "ANGLE=TEXT")]
    pub notes: Vec<String>,

    /// Operator severity for an angle, as angle=level (repeatable)
    #[arg(long = "severity", value_name = "ANGLE=LEVEL")]
    pub severities: Vec<String>,

    /// Do not write a Markdown report
    #[arg(long)]
    pub no_report: bool,
}

pub fn run(args: &InspectArgs, mut config: InspectionConfig) -> Result<()> {
    if args.no_report {
        config.write_report = false;
    }

    let notes = parse_assignments(&args.notes)?;
    let severities = parse_assignments(&args.severities)?
        .into_iter()
        .map(|(angle, level)| Ok((angle, level.parse::<Severity>()?)))
        .collect::<Result<HashMap<Angle, Severity>>>()?;

    let views = [
        (Angle::Front, &args.front),
        (Angle::Rear, &args.rear),
        (Angle::Right, &args.right),
        (Angle::Left, &args.left),
    ];
    let mut request = InspectionRequest::new(&args.vehicle, &args.inspector);
    for (angle, path) in views {
        let Some(path) = path else { continue };
        let capture = load_capture(path)
            .with_context(|| format!("Failed to read {} image {}", angle, path.display()))?;
        let mut capture = AngleCapture::new(angle, capture);
        if let Some(note) = notes.get(&angle) {
            capture = capture.with_note(note.clone());
        }
        if let Some(severity) = severities.get(&angle) {
            capture = capture.with_severity(*severity);
        }
        request = request.with_capture(capture);
    }

    let inspector = Inspector::open(config)?;
    let reporter = BarReporter::new();
    let session = inspector.inspect(&request, &reporter)?;
    print_session(&session);

    Ok(())
}

/// Parse repeated `angle=value` arguments.
fn parse_assignments(raw: &[String]) -> Result<HashMap<Angle, String>> {
    let mut out = HashMap::new();
    for item in raw {
        let Some((angle, value)) = item.split_once('=') else {
            bail!("Expected ANGLE=VALUE, got '{item}'");
        };
        let angle: Angle = angle.parse()?;
        out.insert(angle, value.trim().to_string());
    }
    Ok(out)
}
