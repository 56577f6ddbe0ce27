//! Shared helpers for CLI commands.

use std::path::Path;

use chrono::NaiveDate;
use daymeter_core::{score_events, CalendarConfig, CalendarEvent, ScoredEvent};

/// Read a JSON array of calendar events from disk.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

/// Read and enrich events against the given config.
pub fn load_scored_events(
    path: &Path,
    config: &CalendarConfig,
) -> Result<Vec<ScoredEvent>, Box<dyn std::error::Error>> {
    Ok(score_events(load_events(path)?, config))
}

/// Distinct start days covered by a set of events, sorted.
pub fn event_days(events: &[ScoredEvent]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = events.iter().map(|s| s.event.day()).collect();
    days.sort();
    days.dedup();
    days
}
