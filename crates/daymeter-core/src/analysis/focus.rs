//! Focus-range clustering over scored events.
//!
//! Chains of effortful events separated by small gaps represent one
//! continuous cognitively loaded block. Clusters spanning more than an hour
//! are surfaced as synthetic "Focus Time" ranges; shorter or isolated
//! stretches stay unmarked.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::TAG_DYNAMIC_FOCUS;
use crate::difficulty::ScoredEvent;
use crate::event::{CalendarEvent, EventKind};

/// Largest gap (minutes) absorbed into a running cluster.
const MAX_CLUSTER_GAP_MINUTES: i64 = 15;
/// Cluster span (minutes) that must be strictly exceeded to emit a range.
const MIN_FOCUS_SPAN_MINUTES: i64 = 60;

const FOCUS_COLOR: &str = "#FF0000";

/// Detect contiguous clusters of difficulty-bearing events per day.
///
/// Candidates are plain events with difficulty above zero, grouped by start
/// day and sorted by start time. A gap of at most 15 minutes from the
/// cluster's latest end absorbs the next event; anything larger flushes the
/// cluster. Emitted ranges are clamped to the start day's end.
pub fn detect_focus_ranges(events: &[ScoredEvent]) -> Vec<CalendarEvent> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ScoredEvent>> = BTreeMap::new();
    for scored in events {
        if scored.event.kind != EventKind::Standard {
            continue;
        }
        if scored.difficulty_total() == 0 {
            continue;
        }
        by_day.entry(scored.event.day()).or_default().push(scored);
    }

    let mut results = Vec::new();

    for day_events in by_day.values_mut() {
        day_events.sort_by_key(|s| s.event.start);

        let mut cluster: Vec<&ScoredEvent> = Vec::new();
        for &scored in day_events.iter() {
            if let Some(cluster_end) = cluster_max_end(&cluster) {
                let gap = (scored.event.start - cluster_end).num_minutes();
                if gap > MAX_CLUSTER_GAP_MINUTES {
                    flush_cluster(&cluster, &mut results);
                    cluster.clear();
                }
            }
            cluster.push(scored);
        }
        flush_cluster(&cluster, &mut results);
    }

    results
}

fn cluster_max_end(cluster: &[&ScoredEvent]) -> Option<DateTime<Utc>> {
    cluster.iter().map(|s| s.event.end).max()
}

fn flush_cluster(cluster: &[&ScoredEvent], results: &mut Vec<CalendarEvent>) {
    let Some(first) = cluster.first() else {
        return;
    };

    let start = first.event.start;
    let end = cluster_max_end(cluster).unwrap_or(first.event.end);

    if (end - start).num_minutes() <= MIN_FOCUS_SPAN_MINUTES {
        return;
    }

    // Clamp to the start day's end to keep the range single-day.
    let end = end.min(end_of_day(start.date_naive()));

    results.push(
        CalendarEvent::new("Focus Time", start, end)
            .with_kind(EventKind::Range)
            .with_type_tag(TAG_DYNAMIC_FOCUS)
            .with_color(FOCUS_COLOR),
    );
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    day.and_time(last_second).and_utc()
}
