//! Per-day aggregation and status classification.
//!
//! A day's scored events roll up into a [`DayBreakdown`] with totals per
//! event type, and the breakdown's score/hours classify the day into a
//! coarse [`DayStatusLevel`]. Breakdowns are always recomputed fresh from
//! the day's events, never mutated incrementally.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::ScoredEvent;

/// Default bucket for events without a type assignment.
pub const UNTYPED_BUCKET: &str = "Other";

/// Count/score totals for one event type within a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBucket {
    pub count: u32,
    pub score: f64,
}

/// A day-level penalty applied by the caller (e.g. a missed lunch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPenalty {
    pub reason: String,
    pub points: f64,
    pub count: u32,
}

/// Aggregated statistics for a single day's scored events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// Sum of event difficulty totals plus applied penalties.
    pub total_score: f64,
    /// Minutes spent in events with nonzero difficulty.
    pub deep_work_minutes: i64,
    /// Number of events with nonzero difficulty.
    pub event_count: u32,
    /// Per-type count/score totals.
    pub breakdown: BTreeMap<String, TypeBucket>,
    /// Day-level penalties; per-event bonus reasons are never copied here.
    pub penalties: Vec<DayPenalty>,
}

impl DayBreakdown {
    /// Fold a day-level penalty into the totals, merging repeat reasons.
    pub fn apply_penalty(&mut self, reason: &str, points: f64) {
        self.total_score += points;
        if let Some(penalty) = self.penalties.iter_mut().find(|p| p.reason == reason) {
            penalty.points += points;
            penalty.count += 1;
        } else {
            self.penalties.push(DayPenalty {
                reason: reason.to_string(),
                points,
                count: 1,
            });
        }
    }

    /// Scored hours, as consumed by the status classifier.
    pub fn deep_work_hours(&self) -> f64 {
        self.deep_work_minutes as f64 / 60.0
    }
}

/// Roll up a day's scored events into a breakdown.
///
/// Events carrying a difficulty result contribute their total to the score
/// and to their type bucket (`"Other"` when untagged). Events with nonzero
/// difficulty additionally count toward deep-work minutes and the event
/// count; nonzero difficulty is the proxy for "effortful work" regardless
/// of type tag.
pub fn aggregate_day_stats(events: &[ScoredEvent]) -> DayBreakdown {
    let mut day = DayBreakdown::default();

    for scored in events {
        let Some(difficulty) = &scored.difficulty else {
            continue;
        };

        day.total_score += difficulty.total as f64;

        let tag = scored
            .type_tag
            .clone()
            .unwrap_or_else(|| UNTYPED_BUCKET.to_string());
        let bucket = day.breakdown.entry(tag).or_default();
        bucket.count += 1;
        bucket.score += difficulty.total as f64;

        if difficulty.total > 0 {
            day.deep_work_minutes += scored.event.duration_minutes();
            day.event_count += 1;
        }
    }

    day
}

/// Coarse workload status for a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DayStatusLevel {
    Healthy,
    Moderate,
    Busy,
    Overloaded,
}

impl DayStatusLevel {
    fn from_level(level: u8) -> Self {
        match level {
            0 => DayStatusLevel::Healthy,
            1 => DayStatusLevel::Moderate,
            2 => DayStatusLevel::Busy,
            _ => DayStatusLevel::Overloaded,
        }
    }
}

impl fmt::Display for DayStatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatusLevel::Healthy => write!(f, "healthy"),
            DayStatusLevel::Moderate => write!(f, "moderate"),
            DayStatusLevel::Busy => write!(f, "busy"),
            DayStatusLevel::Overloaded => write!(f, "overloaded"),
        }
    }
}

/// Classify a day from its total score and scored hours.
///
/// Two independent severity ladders are computed and the maximum wins: a
/// day can be overloaded purely on hours even with a low score, or vice
/// versa.
pub fn calculate_day_status(total_score: f64, total_hours: f64) -> DayStatusLevel {
    let hour_level = if total_hours < 1.0 {
        0
    } else if total_hours < 3.0 {
        1
    } else if total_hours < 5.0 {
        2
    } else {
        3
    };

    let score_level = if total_score < 3.0 {
        0
    } else if total_score < 6.0 {
        1
    } else if total_score < 9.0 {
        2
    } else {
        3
    };

    DayStatusLevel::from_level(hour_level.max(score_level))
}
