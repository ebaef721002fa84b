use anyhow::Result;
use clap::Args;
use fleetcheck_core::consts::DEFAULT_HISTORY_LIMIT;
use fleetcheck_core::inspection::{normalize_vehicle_id, HistoryLog, InspectionConfig, Overall};

use crate::summary::print_history;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show the latest inspections of this vehicle
    pub vehicle: Option<String>,

    /// Number of records to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,
}

pub fn run(args: &HistoryArgs, config: &InspectionConfig) -> Result<()> {
    let log = HistoryLog::new(config.history_path());

    match &args.vehicle {
        Some(vehicle) => {
            let records = log.for_vehicle(vehicle, args.limit)?;
            print_history(&normalize_vehicle_id(vehicle)?, &records);
        }
        None => {
            let records = log.load()?;
            let damaged = records.iter().filter(|r| r.overall == Overall::Damaged).count();
            let vehicles = log.vehicles()?;
            println!("History:     {}", log.path().display());
            println!("Inspections: {}", records.len());
            println!("Damaged:     {damaged}");
            println!("Vehicles:    {}", vehicles.len());
            for id in vehicles {
                println!("  {id}");
            }
        }
    }

    Ok(())
}
