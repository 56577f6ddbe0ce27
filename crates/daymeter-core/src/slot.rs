//! Best-slot search within a recurring time window.
//!
//! A tiered, earliest-wins greedy search: candidate starts step forward in
//! fixed 5-minute increments and the first fully-free slot wins outright.
//! Slots conflicting only with skippable events rank above slots conflicting
//! only with movable events. The search deliberately stays greedy and
//! deterministic instead of optimizing across the whole window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{CalendarEvent, EventFlags, EventKind};
use crate::timerange::TimeRangeDefinition;

/// Step between candidate slot starts, in minutes.
const STEP_MINUTES: i64 = 5;
/// Hard iteration cap: a full 24h window at 5-minute steps. Guarantees
/// termination even on misconfigured ranges.
const MAX_ITERATIONS: u32 = 288;

/// Priority class of a found slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotTier {
    /// No conflicting events at all
    Free,
    /// Every conflicting event is skippable
    Skippable,
    /// Every conflicting event is movable
    Movable,
}

impl SlotTier {
    /// Numeric rank, 1 (best) to 3.
    pub fn rank(self) -> u8 {
        match self {
            SlotTier::Free => 1,
            SlotTier::Skippable => 2,
            SlotTier::Movable => 3,
        }
    }
}

/// The best available slot found in a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tier: SlotTier,
}

/// Search a range's window on a day for the best slot of a given duration.
///
/// Busy events of kind marker/zone/range never conflict. A slot conflicting
/// with any event that is neither skippable nor movable is discarded.
/// Displacement flags are looked up by event title, falling back to the
/// event's own flags; unknown events fail closed as non-displaceable.
///
/// # Returns
/// The earliest slot of the best available tier, or `None` if every
/// candidate position conflicts with an immovable event.
pub fn find_best_slot(
    day: NaiveDate,
    range: &TimeRangeDefinition,
    busy_events: &[CalendarEvent],
    event_flags: &HashMap<String, EventFlags>,
    duration_minutes: i64,
) -> Option<BestSlot> {
    let (range_start, range_end) = range.window_on(day);
    let duration = Duration::minutes(duration_minutes);

    let mut best: Option<BestSlot> = None;
    let mut iterations = 0u32;
    let mut slot_start = range_start;

    while slot_start + duration <= range_end && iterations < MAX_ITERATIONS {
        iterations += 1;
        let slot_end = slot_start + duration;

        let overlaps: Vec<&CalendarEvent> = busy_events
            .iter()
            .filter(|e| {
                !matches!(
                    e.kind,
                    EventKind::Marker | EventKind::Zone | EventKind::Range
                )
            })
            .filter(|e| e.overlaps(slot_start, slot_end))
            .collect();

        if overlaps.is_empty() {
            // Earliest fully-free slot wins outright.
            return Some(BestSlot {
                start: slot_start,
                end: slot_end,
                tier: SlotTier::Free,
            });
        }

        let all_skippable = overlaps.iter().all(|e| {
            event_flags
                .get(&e.title)
                .is_some_and(|f| f.skippable)
                || e.is_skippable
        });

        if all_skippable {
            if improves(&best, SlotTier::Skippable) {
                best = Some(BestSlot {
                    start: slot_start,
                    end: slot_end,
                    tier: SlotTier::Skippable,
                });
            }
        } else {
            let all_movable = overlaps.iter().all(|e| {
                event_flags.get(&e.title).is_some_and(|f| f.movable) || e.is_movable
            });

            if all_movable && improves(&best, SlotTier::Movable) {
                best = Some(BestSlot {
                    start: slot_start,
                    end: slot_end,
                    tier: SlotTier::Movable,
                });
            }
        }

        slot_start += Duration::minutes(STEP_MINUTES);
    }

    best
}

/// Keep the earliest slot of each tier: a candidate only replaces the
/// current best when its tier is strictly better.
fn improves(best: &Option<BestSlot>, tier: SlotTier) -> bool {
    best.as_ref().map_or(true, |b| b.tier > tier)
}
