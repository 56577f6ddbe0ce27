//! Recurring weekly time ranges.
//!
//! A range is defined by clock times and a set of weekdays, and may wrap
//! past midnight (end before start). Ranges are instantiated on concrete
//! days relative to the *start* day: an overnight range placed on Monday
//! runs from Monday's start time into Tuesday.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Concrete instant on a given day. Out-of-range components are clamped.
    pub fn on(&self, day: NaiveDate) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.hour.min(23), self.minute.min(59), 0)
            .unwrap_or(NaiveTime::MIN);
        day.and_time(time).and_utc()
    }
}

/// A recurring, possibly overnight, weekly time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRangeDefinition {
    pub id: String,
    pub title: String,
    pub start: ClockTime,
    pub end: ClockTime,
    /// Weekdays the range is instantiated on, relative to the start day
    /// (0=Sunday .. 6=Saturday).
    #[serde(default)]
    pub days: Vec<u8>,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_work: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

fn default_true() -> bool {
    true
}

impl TimeRangeDefinition {
    /// Create an enabled, visible range with a generated id and no days.
    pub fn new(title: impl Into<String>, start: ClockTime, end: ClockTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            start,
            end,
            days: Vec::new(),
            color: String::new(),
            is_enabled: true,
            is_work: false,
            is_visible: true,
        }
    }

    pub fn with_days(mut self, days: Vec<u8>) -> Self {
        self.days = days;
        self
    }

    pub fn with_work(mut self, is_work: bool) -> Self {
        self.is_work = is_work;
        self
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn with_visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether the range is instantiated on the given day
    pub fn applies_on(&self, day: NaiveDate) -> bool {
        self.days
            .contains(&(day.weekday().num_days_from_sunday() as u8))
    }

    /// End clock time before start means the window wraps past midnight
    pub fn is_overnight(&self) -> bool {
        self.end.minutes_from_midnight() < self.start.minutes_from_midnight()
    }

    /// Concrete `[start, end)` window for a day.
    ///
    /// Overnight ranges extend the end into the next day; a range whose end
    /// equals its start yields an empty window.
    pub fn window_on(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.on(day);
        let mut end = self.end.on(day);
        if end < start {
            end += Duration::days(1);
        }
        (start, end)
    }

    /// Whether the instant falls inside the range's clock window on an
    /// applicable day. For overnight ranges the post-midnight portion is
    /// matched on the day it occurs.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if !self.applies_on(at.date_naive()) {
            return false;
        }

        let now_mins = at.hour() * 60 + at.minute();
        let start_mins = self.start.minutes_from_midnight();
        let end_mins = self.end.minutes_from_midnight();

        if end_mins < start_mins {
            now_mins >= start_mins || now_mins < end_mins
        } else {
            now_mins >= start_mins && now_mins < end_mins
        }
    }

    /// Validate clock times and weekday indices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for clock in [self.start, self.end] {
            if clock.hour > 23 || clock.minute > 59 {
                return Err(ValidationError::InvalidClockTime {
                    hour: clock.hour,
                    minute: clock.minute,
                });
            }
        }
        for &day in &self.days {
            if day > 6 {
                return Err(ValidationError::InvalidWeekday(day));
            }
        }
        Ok(())
    }
}

/// Check whether an instant falls inside any enabled, hidden range.
///
/// Used by callers that suppress notifications or overlays during ranges the
/// user marked non-visible.
pub fn in_hidden_range(ranges: &[TimeRangeDefinition], at: DateTime<Utc>) -> bool {
    ranges
        .iter()
        .any(|r| r.is_enabled && !r.is_visible && r.contains(at))
}
