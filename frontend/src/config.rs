//! # Calendar Configuration
//!
//! Tunables for the calendar engine, read from a human-readable YAML file
//! (e.g. `calendar.yaml`). Every field is optional; missing fields fall back
//! to the defaults below.
//!
//! ```yaml
//! swipe_threshold_px: 45.0
//! swipe_progress_distance_px: 120.0
//! fallback_week_row_height_px: 48.0
//! acting_user_id: "user-123"
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CalendarError, CalendarResult};

/// Minimum horizontal/vertical travel, in pixels, before a gesture counts as a swipe
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 45.0;

/// Travel that maps to a full `±1.0` drag progress value
pub const DEFAULT_SWIPE_PROGRESS_DISTANCE_PX: f32 = 120.0;

/// Row height assumed until the host reports a measured one
pub const DEFAULT_WEEK_ROW_HEIGHT_PX: f32 = 48.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub swipe_threshold_px: f32,
    pub swipe_progress_distance_px: f32,
    pub fallback_week_row_height_px: f32,
    /// Identity used to find the acting user's attendance record on a match
    pub acting_user_id: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            swipe_progress_distance_px: DEFAULT_SWIPE_PROGRESS_DISTANCE_PX,
            fallback_week_row_height_px: DEFAULT_WEEK_ROW_HEIGHT_PX,
            acting_user_id: None,
        }
    }
}

impl CalendarConfig {
    /// Parse a YAML document; an empty document yields the defaults
    pub fn from_yaml_str(yaml_content: &str) -> CalendarResult<Self> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CalendarConfig = serde_yaml::from_str(yaml_content)?;
        config.validated()
    }

    /// Load the configuration from a YAML file
    pub fn load(path: &Path) -> CalendarResult<Self> {
        debug!("Loading calendar config from {:?}", path);
        let yaml_content = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml_content)
    }

    /// Load from `path` when it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> CalendarResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("⚠️ Calendar config {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    fn validated(self) -> CalendarResult<Self> {
        let positive = |value: f32| value.is_finite() && value > 0.0;

        if !positive(self.swipe_threshold_px) {
            return Err(CalendarError::Config(format!(
                "swipe_threshold_px must be a positive number, got {}",
                self.swipe_threshold_px
            )));
        }
        if !positive(self.swipe_progress_distance_px) {
            return Err(CalendarError::Config(format!(
                "swipe_progress_distance_px must be a positive number, got {}",
                self.swipe_progress_distance_px
            )));
        }
        if !positive(self.fallback_week_row_height_px) {
            return Err(CalendarError::Config(format!(
                "fallback_week_row_height_px must be a positive number, got {}",
                self.fallback_week_row_height_px
            )));
        }
        Ok(self)
    }
}
