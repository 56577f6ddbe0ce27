//! Free-time gap detection inside work ranges.
//!
//! Walks each concrete work-range instance and surfaces idle gaps of an
//! hour or more between busy events as synthetic "Free Time" zones. Shorter
//! gaps are noise, not actionable free time.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{NON_FREE_MARKER, TAG_FREE_TIME};
use crate::difficulty::ScoredEvent;
use crate::event::{CalendarEvent, EventKind};
use crate::timerange::TimeRangeDefinition;

/// Minimum gap length (minutes) surfaced as actionable free time.
const MIN_FREE_GAP_MINUTES: i64 = 60;

const FREE_TIME_COLOR: &str = "rgba(200, 255, 200, 0.3)";

/// A work range instantiated on a concrete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRangeInstance {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Instantiate enabled work ranges on each of the given days.
pub fn instantiate_work_ranges(
    ranges: &[TimeRangeDefinition],
    days: &[NaiveDate],
) -> Vec<WorkRangeInstance> {
    let mut instances = Vec::new();
    for &day in days {
        for range in ranges {
            if !range.is_enabled || !range.is_work || !range.applies_on(day) {
                continue;
            }
            let (start, end) = range.window_on(day);
            instances.push(WorkRangeInstance { start, end });
        }
    }
    instances
}

/// Detect idle gaps of an hour or more inside work ranges.
///
/// Busy events are plain events with difficulty of at least 1, plus zones
/// explicitly marked `[nonFree::true]` in their notes. Only days that have
/// at least one work-range instance are analyzed. Skippable/movable flags
/// are deliberately not consulted here; they only matter to the slot
/// finder.
pub fn detect_free_time_zones(
    events: &[ScoredEvent],
    work_ranges: &[WorkRangeInstance],
) -> Vec<CalendarEvent> {
    let mut busy_by_day: BTreeMap<NaiveDate, Vec<&ScoredEvent>> = BTreeMap::new();
    for scored in events {
        let busy = match scored.event.kind {
            EventKind::Standard => scored.difficulty_total() >= 1,
            EventKind::Zone => scored.event.has_marker(NON_FREE_MARKER),
            _ => false,
        };
        if busy {
            busy_by_day.entry(scored.event.day()).or_default().push(scored);
        }
    }

    let mut ranges_by_day: BTreeMap<NaiveDate, Vec<&WorkRangeInstance>> = BTreeMap::new();
    for instance in work_ranges {
        ranges_by_day
            .entry(instance.start.date_naive())
            .or_default()
            .push(instance);
    }

    let mut results = Vec::new();

    for (day, day_ranges) in &ranges_by_day {
        let mut day_events: Vec<&ScoredEvent> =
            busy_by_day.get(day).cloned().unwrap_or_default();
        day_events.sort_by_key(|s| s.event.start);

        for instance in day_ranges {
            let overlapping = day_events
                .iter()
                .filter(|s| s.event.overlaps(instance.start, instance.end));

            let mut pointer = instance.start;
            for scored in overlapping {
                if scored.event.start > pointer {
                    push_gap(pointer, scored.event.start, &mut results);
                }
                if scored.event.end > pointer {
                    pointer = scored.event.end;
                }
            }

            // Trailing gap up to the range end
            if instance.end > pointer {
                push_gap(pointer, instance.end, &mut results);
            }
        }
    }

    results
}

fn push_gap(start: DateTime<Utc>, end: DateTime<Utc>, results: &mut Vec<CalendarEvent>) {
    if (end - start).num_minutes() < MIN_FREE_GAP_MINUTES {
        return;
    }
    results.push(
        CalendarEvent::new("Free Time", start, end)
            .with_kind(EventKind::Zone)
            .with_type_tag(TAG_FREE_TIME)
            .with_color(FREE_TIME_COLOR),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyResult;
    use chrono::TimeZone;

    fn dt(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, m, 0).unwrap()
    }

    fn busy(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ScoredEvent {
        ScoredEvent {
            event: CalendarEvent::new(title, start, end),
            difficulty: Some(DifficultyResult {
                base: 1,
                bonus: 0,
                total: 1,
                reasons: Vec::new(),
            }),
            type_tag: None,
        }
    }

    fn work_day(d: u32) -> WorkRangeInstance {
        WorkRangeInstance {
            start: dt(d, 9, 0),
            end: dt(d, 17, 0),
        }
    }

    #[test]
    fn test_gaps_before_between_and_after_events() {
        // 9-17 work day, busy 10:30-11:00 and 12:00-13:00:
        // leading 9:00-10:30, middle 11:00-12:00, trailing 13:00-17:00
        let events = vec![
            busy("Standup", dt(2, 10, 30), dt(2, 11, 0)),
            busy("Lunch Meeting", dt(2, 12, 0), dt(2, 13, 0)),
        ];

        let zones = detect_free_time_zones(&events, &[work_day(2)]);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].start, dt(2, 9, 0));
        assert_eq!(zones[0].end, dt(2, 10, 30));
        assert_eq!(zones[1].start, dt(2, 11, 0));
        assert_eq!(zones[1].end, dt(2, 12, 0));
        assert_eq!(zones[2].start, dt(2, 13, 0));
        assert_eq!(zones[2].end, dt(2, 17, 0));
        assert!(zones.iter().all(|z| z.kind == EventKind::Zone));
        assert!(zones
            .iter()
            .all(|z| z.type_tag.as_deref() == Some(TAG_FREE_TIME)));
    }

    #[test]
    fn test_fifty_nine_minute_gap_is_ignored_sixty_is_kept() {
        let events = vec![
            busy("A", dt(2, 9, 0), dt(2, 10, 0)),
            busy("B", dt(2, 10, 59), dt(2, 17, 0)),
        ];
        assert!(detect_free_time_zones(&events, &[work_day(2)]).is_empty());

        let events = vec![
            busy("A", dt(2, 9, 0), dt(2, 10, 0)),
            busy("B", dt(2, 11, 0), dt(2, 17, 0)),
        ];
        let zones = detect_free_time_zones(&events, &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 10, 0));
        assert_eq!(zones[0].end, dt(2, 11, 0));
    }

    #[test]
    fn test_days_without_work_ranges_are_skipped() {
        // Tuesday's busy events are never analyzed when only Monday has a
        // work range; Monday itself reads as one fully free stretch
        let events = vec![busy("A", dt(3, 9, 0), dt(3, 10, 0))];

        let zones = detect_free_time_zones(&events, &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 9, 0));
        assert_eq!(zones[0].end, dt(2, 17, 0));

        // No work ranges at all: nothing is analyzed
        assert!(detect_free_time_zones(&events, &[]).is_empty());
    }

    #[test]
    fn test_zero_difficulty_events_do_not_block_free_time() {
        let mut idle = busy("Browsing", dt(2, 9, 0), dt(2, 17, 0));
        idle.difficulty = Some(DifficultyResult::zero());

        let zones = detect_free_time_zones(&[idle], &[work_day(2)]);
        assert_eq!(zones.len(), 1, "whole range should read as free");
        assert_eq!(zones[0].start, dt(2, 9, 0));
        assert_eq!(zones[0].end, dt(2, 17, 0));
    }

    #[test]
    fn test_non_free_zone_marker_counts_as_busy() {
        let reserved = ScoredEvent::unscored(
            CalendarEvent::new("Reserved", dt(2, 9, 0), dt(2, 12, 0))
                .with_kind(EventKind::Zone)
                .with_notes("hold this block [nonFree::true]"),
        );

        let zones = detect_free_time_zones(&[reserved], &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 12, 0));
        assert_eq!(zones[0].end, dt(2, 17, 0));

        // Without the marker the zone is invisible to the detector
        let plain = ScoredEvent::unscored(
            CalendarEvent::new("Reserved", dt(2, 9, 0), dt(2, 12, 0)).with_kind(EventKind::Zone),
        );
        let zones = detect_free_time_zones(&[plain], &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 9, 0));
    }

    #[test]
    fn test_overlapping_busy_events_advance_pointer_monotonically() {
        // Second event is nested inside the first; the pointer must not move
        // backwards and re-open the covered stretch
        let events = vec![
            busy("Long", dt(2, 9, 0), dt(2, 13, 0)),
            busy("Nested", dt(2, 10, 0), dt(2, 11, 0)),
        ];

        let zones = detect_free_time_zones(&events, &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 13, 0));
        assert_eq!(zones[0].end, dt(2, 17, 0));
    }

    #[test]
    fn test_event_straddling_range_start_closes_leading_gap() {
        let events = vec![busy("Early", dt(2, 8, 0), dt(2, 10, 0))];

        let zones = detect_free_time_zones(&events, &[work_day(2)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].start, dt(2, 10, 0));
        assert_eq!(zones[0].end, dt(2, 17, 0));
    }

    #[test]
    fn test_instantiate_work_ranges_filters_and_wraps() {
        use crate::timerange::ClockTime;

        let work =
            TimeRangeDefinition::new("Work Hours", ClockTime::new(9, 0), ClockTime::new(17, 0))
                .with_days(vec![1, 2, 3, 4, 5])
                .with_work(true);
        let lunch =
            TimeRangeDefinition::new("Lunch", ClockTime::new(12, 0), ClockTime::new(14, 0))
                .with_days(vec![1, 2, 3, 4, 5]);
        let disabled =
            TimeRangeDefinition::new("Old Hours", ClockTime::new(8, 0), ClockTime::new(16, 0))
                .with_days(vec![1, 2, 3, 4, 5])
                .with_work(true)
                .with_enabled(false);

        // 2026-03-02 Monday, 2026-03-01 Sunday
        let days = vec![
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        ];

        let instances = instantiate_work_ranges(&[work, lunch, disabled], &days);
        assert_eq!(instances.len(), 1, "only the enabled work range on Monday");
        assert_eq!(instances[0].start, dt(2, 9, 0));
        assert_eq!(instances[0].end, dt(2, 17, 0));
    }
}
