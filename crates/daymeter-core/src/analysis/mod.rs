//! Schedule analysis: event enrichment and synthetic overlay detection.
//!
//! This module provides:
//! - Title-keyed enrichment of raw calendar events with difficulty and type
//! - Focus-range clustering of effortful events
//! - Free-time gap detection inside work ranges

mod focus;
mod free_time;

pub use focus::detect_focus_ranges;
pub use free_time::{detect_free_time_zones, instantiate_work_ranges, WorkRangeInstance};

use crate::difficulty::{calculate_event_difficulty, ScoredEvent};
use crate::event::{CalendarEvent, EventKind};
use crate::storage::CalendarConfig;

/// Type tag attached to synthetic focus ranges.
pub const TAG_DYNAMIC_FOCUS: &str = "DYNAMIC_FOCUS";
/// Type tag attached to synthetic free-time zones.
pub const TAG_FREE_TIME: &str = "FREE_TIME";
/// Inline note marker opting a zero-difficulty zone into free-time
/// busy-ness.
pub const NON_FREE_MARKER: &str = "[nonFree::true]";

/// Enrich raw events with title-keyed difficulty, flags and type tags.
///
/// Configuration is keyed by event title: renaming an event in the calendar
/// silently disassociates it from its difficulty, flags and type
/// assignment. Synthetic kinds (markers, zones, ranges, generated events)
/// pass through unscored.
pub fn score_events(events: Vec<CalendarEvent>, config: &CalendarConfig) -> Vec<ScoredEvent> {
    events
        .into_iter()
        .map(|event| {
            if event.kind != EventKind::Standard {
                return ScoredEvent::unscored(event);
            }

            let base = config.base_difficulty(&event.title);
            let flags = config.flags(&event.title);
            let difficulty =
                calculate_event_difficulty(&event, base, &config.ranges, flags.as_ref());
            let type_tag = config.type_tag(&event.title).map(str::to_string);

            ScoredEvent {
                event,
                difficulty: Some(difficulty),
                type_tag,
            }
        })
        .collect()
}
