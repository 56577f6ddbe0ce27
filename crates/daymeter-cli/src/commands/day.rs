use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use daymeter_core::{
    aggregate_day_stats, calculate_day_status, suggest_activity, CalendarConfig, DayBreakdown,
    DayStatusLevel, ScoredEvent, SuggestionConfig,
};

use super::common::load_scored_events;

#[derive(Args)]
pub struct DayArgs {
    /// Date to analyze (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Path to a JSON file with calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// Fold lunch suggestion penalties into the breakdown
    #[arg(long)]
    pub with_lunch: bool,
    /// Machine-readable output
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DayReport {
    date: NaiveDate,
    status: DayStatusLevel,
    breakdown: DayBreakdown,
}

pub fn run(args: DayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = CalendarConfig::load()?;
    let scored = load_scored_events(&args.events, &config)?;

    let day_events: Vec<ScoredEvent> = scored
        .iter()
        .filter(|s| s.event.day() == args.date)
        .cloned()
        .collect();
    let mut breakdown = aggregate_day_stats(&day_events);

    if args.with_lunch {
        let outcome = suggest_activity(
            "Lunch",
            &[args.date],
            &scored,
            &config.ranges,
            &config.event_flags,
            &SuggestionConfig::default(),
        );
        for penalty in outcome.penalties.iter().filter(|p| p.day == args.date) {
            breakdown.apply_penalty(&penalty.reason, penalty.points);
        }
    }

    let status = calculate_day_status(breakdown.total_score, breakdown.deep_work_hours());

    if args.json {
        let report = DayReport {
            date: args.date,
            status,
            breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", args.date, status);
    println!("score: {:.0}", breakdown.total_score);
    println!(
        "deep work: {}h {}m across {} events",
        breakdown.deep_work_minutes / 60,
        breakdown.deep_work_minutes % 60,
        breakdown.event_count
    );
    for (tag, bucket) in &breakdown.breakdown {
        println!("  {}: {} events, {:.0} pts", tag, bucket.count, bucket.score);
    }
    for penalty in &breakdown.penalties {
        println!(
            "  penalty {}: +{:.0} (x{})",
            penalty.reason, penalty.points, penalty.count
        );
    }
    Ok(())
}
