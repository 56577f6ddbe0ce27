//! Recurring-activity suggestions over a date window.
//!
//! Finds a slot for a recurring activity (lunch, a walk) on each day of a
//! window and emits either a suggested event or a missed-activity marker,
//! plus day-level penalty points the caller folds into its breakdowns.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::difficulty::ScoredEvent;
use crate::event::{CalendarEvent, EventFlags, EventKind};
use crate::slot::{find_best_slot, BestSlot, SlotTier};
use crate::timerange::TimeRangeDefinition;

/// Tuning for a recurring-activity suggestion pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Slot length searched for.
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    /// Only accept fully-free slots; conflicted tiers produce nothing and
    /// no penalties (walk-style suggestions).
    #[serde(default)]
    pub free_slots_only: bool,
    /// Penalty when the suggested slot displaces movable events.
    #[serde(default = "default_conflict_penalty")]
    pub conflict_penalty: f64,
    /// Penalty when no slot fits at all.
    #[serde(default = "default_missed_penalty")]
    pub missed_penalty: f64,
}

fn default_duration() -> i64 {
    60
}
fn default_conflict_penalty() -> f64 {
    1.0
}
fn default_missed_penalty() -> f64 {
    2.0
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration(),
            free_slots_only: false,
            conflict_penalty: default_conflict_penalty(),
            missed_penalty: default_missed_penalty(),
        }
    }
}

/// A day-level penalty produced by a suggestion pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPenalty {
    pub day: NaiveDate,
    pub reason: String,
    pub points: f64,
}

/// Result of a suggestion pass over a date window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    /// Suggested events and missed-activity markers.
    pub events: Vec<CalendarEvent>,
    /// Penalties for the caller's day breakdowns.
    pub penalties: Vec<ActivityPenalty>,
}

/// Suggest a slot for a recurring activity on each day of a window.
///
/// The activity name must match an enabled range title (e.g. "Lunch"). Days
/// the range is not configured for are skipped, as are days that already
/// contain an event with the activity's title. Only events with difficulty
/// of at least 1 block a suggestion.
pub fn suggest_activity(
    activity: &str,
    days: &[NaiveDate],
    events: &[ScoredEvent],
    ranges: &[TimeRangeDefinition],
    event_flags: &HashMap<String, EventFlags>,
    config: &SuggestionConfig,
) -> SuggestionOutcome {
    let mut outcome = SuggestionOutcome::default();

    let Some(range) = ranges
        .iter()
        .find(|r| r.is_enabled && r.title == activity)
    else {
        return outcome;
    };

    for &day in days {
        if !range.applies_on(day) {
            continue;
        }

        let day_events: Vec<&ScoredEvent> = events
            .iter()
            .filter(|s| s.event.day() == day)
            .collect();

        // A manually scheduled instance suppresses the suggestion.
        if day_events
            .iter()
            .any(|s| s.event.title.eq_ignore_ascii_case(activity))
        {
            continue;
        }

        // Zero-difficulty events never block a suggestion.
        let busy: Vec<CalendarEvent> = day_events
            .iter()
            .filter(|s| s.difficulty_total() >= 1)
            .map(|s| s.event.clone())
            .collect();

        let slot = find_best_slot(day, range, &busy, event_flags, config.duration_minutes);

        if config.free_slots_only {
            if let Some(slot) = slot {
                if slot.tier == SlotTier::Free {
                    outcome.events.push(suggested_event(activity, range, &slot));
                }
            }
            continue;
        }

        match slot {
            Some(slot) => {
                if slot.tier == SlotTier::Movable {
                    outcome.penalties.push(ActivityPenalty {
                        day,
                        reason: format!("{activity} Conflict"),
                        points: config.conflict_penalty,
                    });
                }
                outcome.events.push(suggested_event(activity, range, &slot));
            }
            None => {
                outcome.penalties.push(ActivityPenalty {
                    day,
                    reason: format!("Missed {activity}"),
                    points: config.missed_penalty,
                });

                // Zero-length marker at the end of the window
                let (_, range_end) = range.window_on(day);
                outcome.events.push(
                    CalendarEvent::new(format!("Missed {activity}"), range_end, range_end)
                        .with_kind(EventKind::Marker)
                        .with_type_tag(activity_tag(activity, "MISSED"))
                        .with_color("#ef4444"),
                );
            }
        }
    }

    outcome
}

fn suggested_event(
    activity: &str,
    range: &TimeRangeDefinition,
    slot: &BestSlot,
) -> CalendarEvent {
    let mut event = CalendarEvent::new(format!("{activity} (Suggested)"), slot.start, slot.end)
        .with_kind(EventKind::Generated)
        .with_type_tag(activity_tag(activity, "SUGGESTION"));
    if !range.color.is_empty() {
        event = event.with_color(range.color.clone());
    }
    event
}

fn activity_tag(activity: &str, suffix: &str) -> String {
    let name: String = activity
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{name}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyResult;
    use crate::timerange::ClockTime;
    use chrono::{DateTime, TimeZone, Utc};

    // 2026-03-02 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn lunch_range() -> TimeRangeDefinition {
        TimeRangeDefinition::new("Lunch", ClockTime::new(12, 0), ClockTime::new(14, 0))
            .with_days(vec![1, 2, 3, 4, 5])
            .with_color("#fbbf24")
    }

    fn busy(title: &str, start: DateTime<Utc>, end: DateTime<Utc>, total: u32) -> ScoredEvent {
        ScoredEvent {
            event: CalendarEvent::new(title, start, end),
            difficulty: Some(DifficultyResult {
                base: total,
                bonus: 0,
                total,
                reasons: Vec::new(),
            }),
            type_tag: None,
        }
    }

    #[test]
    fn test_free_window_produces_suggestion_without_penalty() {
        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &[],
            &[lunch_range()],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert_eq!(outcome.events.len(), 1);
        assert!(outcome.penalties.is_empty());

        let event = &outcome.events[0];
        assert_eq!(event.title, "Lunch (Suggested)");
        assert_eq!(event.kind, EventKind::Generated);
        assert_eq!(event.type_tag.as_deref(), Some("LUNCH_SUGGESTION"));
        assert_eq!(event.start, dt(12, 0));
        assert_eq!(event.end, dt(13, 0));
        assert_eq!(event.color.as_deref(), Some("#fbbf24"));
    }

    #[test]
    fn test_movable_conflict_suggests_with_penalty() {
        let events = vec![busy("Focus Block", dt(11, 30), dt(14, 30), 2)];
        let flags = HashMap::from([(
            "Focus Block".to_string(),
            EventFlags {
                movable: true,
                ..Default::default()
            },
        )]);

        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &events,
            &[lunch_range()],
            &flags,
            &SuggestionConfig::default(),
        );

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.penalties.len(), 1);
        assert_eq!(outcome.penalties[0].reason, "Lunch Conflict");
        assert_eq!(outcome.penalties[0].points, 1.0);
    }

    #[test]
    fn test_blocked_window_emits_missed_marker_and_penalty() {
        let events = vec![busy("Board Meeting", dt(11, 30), dt(14, 30), 3)];

        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &events,
            &[lunch_range()],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert_eq!(outcome.events.len(), 1);
        let marker = &outcome.events[0];
        assert_eq!(marker.title, "Missed Lunch");
        assert_eq!(marker.kind, EventKind::Marker);
        assert_eq!(marker.type_tag.as_deref(), Some("LUNCH_MISSED"));
        assert_eq!(marker.start, dt(14, 0));
        assert_eq!(marker.end, dt(14, 0));

        assert_eq!(outcome.penalties.len(), 1);
        assert_eq!(outcome.penalties[0].reason, "Missed Lunch");
        assert_eq!(outcome.penalties[0].points, 2.0);
    }

    #[test]
    fn test_existing_activity_event_suppresses_suggestion() {
        let events = vec![busy("lunch", dt(12, 30), dt(13, 0), 0)];

        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &events,
            &[lunch_range()],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert!(outcome.events.is_empty());
        assert!(outcome.penalties.is_empty());
    }

    #[test]
    fn test_zero_difficulty_events_do_not_block() {
        let events = vec![busy("Browsing", dt(11, 0), dt(15, 0), 0)];

        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &events,
            &[lunch_range()],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].title, "Lunch (Suggested)");
    }

    #[test]
    fn test_free_slots_only_rejects_conflicted_tiers_silently() {
        let events = vec![busy("Focus Block", dt(11, 30), dt(14, 30), 2)];
        let flags = HashMap::from([(
            "Focus Block".to_string(),
            EventFlags {
                movable: true,
                ..Default::default()
            },
        )]);

        let config = SuggestionConfig {
            free_slots_only: true,
            ..Default::default()
        };
        let outcome = suggest_activity(
            "Walk",
            &[monday()],
            &events,
            &[TimeRangeDefinition::new(
                "Walk",
                ClockTime::new(12, 0),
                ClockTime::new(14, 0),
            )
            .with_days(vec![1, 2, 3, 4, 5])],
            &flags,
            &config,
        );

        assert!(outcome.events.is_empty());
        assert!(outcome.penalties.is_empty());
    }

    #[test]
    fn test_unconfigured_days_are_skipped() {
        // 2026-03-01 is a Sunday, outside the range's weekday set
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let outcome = suggest_activity(
            "Lunch",
            &[sunday],
            &[],
            &[lunch_range()],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert!(outcome.events.is_empty());
        assert!(outcome.penalties.is_empty());
    }

    #[test]
    fn test_missing_range_definition_yields_empty_outcome() {
        let outcome = suggest_activity(
            "Lunch",
            &[monday()],
            &[],
            &[],
            &HashMap::new(),
            &SuggestionConfig::default(),
        );

        assert!(outcome.events.is_empty());
        assert!(outcome.penalties.is_empty());
    }
}
