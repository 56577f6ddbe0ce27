//! Calendar event types consumed by the analysis engine.
//!
//! Events come from an external calendar source and are read-only inputs.
//! Per-title behavior flags are looked up in user configuration keyed by the
//! event's title string, so renaming an event disassociates it from its
//! configuration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Behavior class of a calendar event.
///
/// Synthetic overlays (markers, zones, ranges) share the event shape with
/// real calendar entries but are excluded from slot conflicts and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A real calendar entry
    #[default]
    Standard,
    /// Zero-length annotation (e.g. a missed-activity marker)
    Marker,
    /// Background zone overlay (e.g. detected free time)
    Zone,
    /// Range overlay (e.g. a detected focus block)
    Range,
    /// Suggested event generated by the engine
    Generated,
}

/// A calendar event as provided by an external calendar source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Free-form notes; may carry inline `[key::value]` markers.
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_movable: bool,
    #[serde(default)]
    pub is_skippable: bool,
}

impl CalendarEvent {
    /// Create a new event with a generated id.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            start,
            end,
            all_day: false,
            calendar_id: None,
            attendees: Vec::new(),
            recurrence_rule: None,
            kind: EventKind::Standard,
            type_tag: None,
            color: None,
            notes: None,
            is_movable: false,
            is_skippable: false,
        }
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this event strictly overlaps a time range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    /// Calendar day the event starts on
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Check whether the notes carry a literal inline marker
    pub fn has_marker(&self, marker: &str) -> bool {
        self.notes.as_deref().is_some_and(|n| n.contains(marker))
    }
}

/// Per-title behavior flags.
///
/// `movable` and `skippable` are the two displacement tiers the slot finder
/// uses; all flags default to false, so an event with no configuration can
/// never be treated as displaceable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlags {
    #[serde(default)]
    pub is_english: bool,
    #[serde(default)]
    pub movable: bool,
    #[serde(default)]
    pub skippable: bool,
    #[serde(default)]
    pub need_prep: bool,
    #[serde(default)]
    pub completable: bool,
}
