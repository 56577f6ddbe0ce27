//! TOML-based schedule configuration.
//!
//! Stores the user's event-type catalog and the per-title maps driving the
//! analysis engine:
//! - Event type definitions and title -> type assignments
//! - Title -> base difficulty
//! - Title -> behavior flags (movable, skippable, ...)
//! - Recurring time ranges (work hours, lunch, walk)
//!
//! Configuration is stored at `~/.config/daymeter/config.toml`. Every map is
//! keyed by event *title*: renaming an event in the calendar silently
//! disassociates it from its configuration here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::event::EventFlags;
use crate::timerange::TimeRangeDefinition;

/// A user-defined event type (category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Schedule analysis configuration.
///
/// Serialized to/from TOML at `~/.config/daymeter/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub types: Vec<EventTypeDef>,
    /// Event title -> type id.
    #[serde(default)]
    pub assignments: HashMap<String, String>,
    /// Event title -> base difficulty.
    #[serde(default)]
    pub difficulties: HashMap<String, u32>,
    /// Event title -> behavior flags.
    #[serde(default)]
    pub event_flags: HashMap<String, EventFlags>,
    #[serde(default)]
    pub ranges: Vec<TimeRangeDefinition>,
}

impl CalendarConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Expose the on-disk location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Self::path()
    }

    /// Load from the default location, writing the default config if the
    /// file does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content),
            Err(_) => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML document, validating every range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CalendarConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        for range in &config.ranges {
            range
                .validate()
                .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        }
        Ok(config)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Base difficulty for an event title (0 when unassigned).
    pub fn base_difficulty(&self, title: &str) -> u32 {
        self.difficulties.get(title).copied().unwrap_or(0)
    }

    /// Behavior flags for an event title, if configured.
    pub fn flags(&self, title: &str) -> Option<EventFlags> {
        self.event_flags.get(title).copied()
    }

    /// Resolved type title for an event title, via its assignment.
    pub fn type_tag(&self, title: &str) -> Option<&str> {
        let type_id = self.assignments.get(title)?;
        self.types
            .iter()
            .find(|t| &t.id == type_id)
            .map(|t| t.title.as_str())
    }

    /// Enabled ranges marked as work hours.
    pub fn work_ranges(&self) -> Vec<&TimeRangeDefinition> {
        self.ranges
            .iter()
            .filter(|r| r.is_enabled && r.is_work)
            .collect()
    }
}
