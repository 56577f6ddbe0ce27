//! Per-event workload difficulty scoring.
//!
//! An event's difficulty is its user-assigned base value plus rule-derived
//! bonuses:
//! - +1 for events flagged as English-language
//! - +1 when any part of the event falls outside all configured work ranges
//!
//! Events with base difficulty 0 are exempt from scoring entirely: they
//! never accrue bonuses regardless of ranges or flags.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{CalendarEvent, EventFlags};
use crate::timerange::TimeRangeDefinition;

/// Bonus reason recorded for events flagged as English-language.
pub const REASON_ENGLISH: &str = "English Event";
/// Bonus reason recorded when part of an event falls outside work hours.
pub const REASON_OUTSIDE_WORK: &str = "Outside Work Hours";

/// Difficulty score for a single event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyResult {
    pub base: u32,
    pub bonus: u32,
    pub total: u32,
    pub reasons: Vec<String>,
}

impl DifficultyResult {
    /// Zero result for events exempt from scoring.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A calendar event enriched with its score and resolved type tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub event: CalendarEvent,
    /// Absent for synthetic events (markers, zones, ranges).
    pub difficulty: Option<DifficultyResult>,
    pub type_tag: Option<String>,
}

impl ScoredEvent {
    /// Wrap an event that carries no score.
    pub fn unscored(event: CalendarEvent) -> Self {
        Self {
            event,
            difficulty: None,
            type_tag: None,
        }
    }

    /// Total difficulty, 0 when the event carries no score.
    pub fn difficulty_total(&self) -> u32 {
        self.difficulty.as_ref().map(|d| d.total).unwrap_or(0)
    }
}

/// Score a single event.
///
/// # Arguments
/// * `event` - The event to score
/// * `base_difficulty` - User-assigned base value looked up by event title
/// * `ranges` - All configured time ranges; only enabled work ranges matter
/// * `flags` - Per-title behavior flags, if configured
pub fn calculate_event_difficulty(
    event: &CalendarEvent,
    base_difficulty: u32,
    ranges: &[TimeRangeDefinition],
    flags: Option<&EventFlags>,
) -> DifficultyResult {
    // Events with no assigned difficulty never accrue bonuses.
    if base_difficulty == 0 {
        return DifficultyResult::zero();
    }

    let mut reasons = Vec::new();
    let mut bonus = 0;

    if flags.is_some_and(|f| f.is_english) {
        reasons.push(REASON_ENGLISH.to_string());
        bonus += 1;
    }

    let work_ranges: Vec<&TimeRangeDefinition> = ranges
        .iter()
        .filter(|r| r.is_enabled && r.is_work)
        .collect();

    // Without any configured work range the outside-work check is skipped
    // entirely; the empty union would otherwise flag every event.
    if !work_ranges.is_empty() {
        let covered = covered_work_duration(event, &work_ranges);
        if covered < event.end - event.start {
            reasons.push(REASON_OUTSIDE_WORK.to_string());
            bonus += 1;
        }
    }

    DifficultyResult {
        base: base_difficulty,
        bonus,
        total: base_difficulty + bonus,
        reasons,
    }
}

/// Total duration of the event covered by the union of work-range instances.
///
/// A range may recur on several days within a multi-day event, so instances
/// are built for every calendar day the event spans, intersected with the
/// event, then merged into a disjoint interval set before summing.
fn covered_work_duration(
    event: &CalendarEvent,
    work_ranges: &[&TimeRangeDefinition],
) -> Duration {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();

    let mut day = event.start.date_naive();
    let last = event.end.date_naive();
    while day <= last {
        for range in work_ranges {
            if !range.applies_on(day) {
                continue;
            }
            let (r_start, r_end) = range.window_on(day);
            let int_start = r_start.max(event.start);
            let int_end = r_end.min(event.end);
            if int_start < int_end {
                intervals.push((int_start, int_end));
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    intervals.sort_by_key(|(start, _)| *start);

    // Merge overlapping or adjacent sub-intervals.
    let mut covered = Duration::zero();
    let mut current: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for (start, end) in intervals {
        match current {
            Some((cur_start, cur_end)) if start <= cur_end => {
                current = Some((cur_start, cur_end.max(end)));
            }
            Some((cur_start, cur_end)) => {
                covered += cur_end - cur_start;
                current = Some((start, end));
            }
            None => current = Some((start, end)),
        }
    }
    if let Some((cur_start, cur_end)) = current {
        covered += cur_end - cur_start;
    }

    covered
}

/// Difficulty calculator bound to a range configuration.
pub struct DifficultyCalculator<'a> {
    ranges: &'a [TimeRangeDefinition],
}

impl<'a> DifficultyCalculator<'a> {
    pub fn new(ranges: &'a [TimeRangeDefinition]) -> Self {
        Self { ranges }
    }

    /// Score an event against the bound ranges.
    pub fn score(
        &self,
        event: &CalendarEvent,
        base_difficulty: u32,
        flags: Option<&EventFlags>,
    ) -> DifficultyResult {
        calculate_event_difficulty(event, base_difficulty, self.ranges, flags)
    }
}
