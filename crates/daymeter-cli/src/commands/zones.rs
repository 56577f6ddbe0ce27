use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use daymeter_core::{
    detect_focus_ranges, detect_free_time_zones, instantiate_work_ranges, CalendarConfig,
    CalendarEvent,
};

use super::common::{event_days, load_scored_events};

#[derive(Args)]
pub struct ZonesArgs {
    /// Path to a JSON file with calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// Machine-readable output
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ZonesReport {
    focus_ranges: Vec<CalendarEvent>,
    free_time_zones: Vec<CalendarEvent>,
}

pub fn run(args: ZonesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = CalendarConfig::load()?;
    let scored = load_scored_events(&args.events, &config)?;

    let days = event_days(&scored);
    let focus_ranges = detect_focus_ranges(&scored);
    let instances = instantiate_work_ranges(&config.ranges, &days);
    let free_time_zones = detect_free_time_zones(&scored, &instances);

    if args.json {
        let report = ZonesReport {
            focus_ranges,
            free_time_zones,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("focus ranges: {}", focus_ranges.len());
    for range in &focus_ranges {
        println!("  {} to {}", range.start, range.end);
    }
    println!("free time zones: {}", free_time_zones.len());
    for zone in &free_time_zones {
        println!("  {} to {}", zone.start, zone.end);
    }
    Ok(())
}
