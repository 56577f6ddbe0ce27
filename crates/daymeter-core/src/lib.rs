//! # Daymeter Core Library
//!
//! Core business logic for Daymeter, a calendar workload analyzer. The
//! library scores calendar events against user configuration, rolls days up
//! into workload breakdowns, searches recurring windows for open slots, and
//! derives synthetic focus/free-time overlays for rendering.
//!
//! ## Architecture
//!
//! - **Difficulty**: per-event scoring from a base value plus rule bonuses
//! - **Day stats**: per-day aggregation and coarse status classification
//! - **Slot finder**: tiered, earliest-wins search within a recurring window
//! - **Analysis**: event enrichment plus focus-range and free-time detection
//! - **Suggestions**: recurring-activity placement (lunch, walk) with
//!   day-level penalties
//! - **Storage**: TOML configuration keyed by event title
//!
//! All analysis functions are pure and deterministic: same inputs, same
//! outputs, no side effects. Callers recompute freely on every data refresh.
//!
//! ## Key Components
//!
//! - [`calculate_event_difficulty`]: score one event
//! - [`aggregate_day_stats`] / [`calculate_day_status`]: day rollups
//! - [`find_best_slot`]: tiered slot search
//! - [`detect_focus_ranges`] / [`detect_free_time_zones`]: synthetic overlays
//! - [`CalendarConfig`]: title-keyed user configuration

pub mod analysis;
pub mod day_stats;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod slot;
pub mod storage;
pub mod suggestion;
pub mod timerange;

pub use analysis::{
    detect_focus_ranges, detect_free_time_zones, instantiate_work_ranges, score_events,
    WorkRangeInstance, NON_FREE_MARKER, TAG_DYNAMIC_FOCUS, TAG_FREE_TIME,
};
pub use day_stats::{
    aggregate_day_stats, calculate_day_status, DayBreakdown, DayPenalty, DayStatusLevel,
    TypeBucket,
};
pub use difficulty::{
    calculate_event_difficulty, DifficultyCalculator, DifficultyResult, ScoredEvent,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use event::{CalendarEvent, EventFlags, EventKind};
pub use slot::{find_best_slot, BestSlot, SlotTier};
pub use storage::{CalendarConfig, EventTypeDef};
pub use suggestion::{suggest_activity, ActivityPenalty, SuggestionConfig, SuggestionOutcome};
pub use timerange::{in_hidden_range, ClockTime, TimeRangeDefinition};
