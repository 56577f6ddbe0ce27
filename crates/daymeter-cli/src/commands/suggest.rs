use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use daymeter_core::{suggest_activity, CalendarConfig, SuggestionConfig};

use super::common::load_scored_events;

#[derive(Args)]
pub struct SuggestArgs {
    /// Activity name matching a configured range title (e.g. Lunch, Walk)
    pub activity: String,
    /// Date to search (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Path to a JSON file with calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// Slot length in minutes
    #[arg(long, default_value_t = 60)]
    pub duration: i64,
    /// Only accept a fully free slot
    #[arg(long)]
    pub free_only: bool,
    /// Machine-readable output
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = CalendarConfig::load()?;
    let scored = load_scored_events(&args.events, &config)?;

    let suggestion_config = SuggestionConfig {
        duration_minutes: args.duration,
        free_slots_only: args.free_only,
        ..Default::default()
    };
    let outcome = suggest_activity(
        &args.activity,
        &[args.date],
        &scored,
        &config.ranges,
        &config.event_flags,
        &suggestion_config,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if outcome.events.is_empty() {
        println!("no suggestion for {} on {}", args.activity, args.date);
        return Ok(());
    }
    for event in &outcome.events {
        println!("{}: {} to {}", event.title, event.start, event.end);
    }
    for penalty in &outcome.penalties {
        println!("penalty {}: +{:.0}", penalty.reason, penalty.points);
    }
    Ok(())
}
