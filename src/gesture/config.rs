use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigError;

/// Tuning for the pull-to-refresh gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Multiplier applied to raw drag distance (default: 0.5)
    pub damping: f32,

    /// Cap on the damped distance (default: 200)
    pub max_distance: f32,

    /// Damped distance that must be exceeded on release to refresh (default: 60)
    pub trigger_threshold: f32,

    /// Where the indicator rests while a refresh is in flight (default: 60)
    pub refreshing_offset: f32,

    /// Time after a trigger during which no new gesture is accepted (default: 1500)
    pub cooldown_ms: u64,

    /// Length of the feedback pulse on trigger (default: 50)
    pub haptic_pulse_ms: u64,

    /// Ring the terminal bell as feedback on trigger (default: true)
    pub haptics: bool,

    /// Gesture units per terminal row dragged (default: 16)
    pub units_per_row: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            damping: 0.5,
            max_distance: 200.0,
            trigger_threshold: 60.0,
            refreshing_offset: 60.0,
            cooldown_ms: 1500,
            haptic_pulse_ms: 50,
            haptics: true,
            units_per_row: 16.0,
        }
    }
}

impl GestureConfig {
    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }

    /// Reject values that would make damped distances negative or a refresh unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::InvalidGesture {
                field,
                reason: reason.to_string(),
            })
        };

        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping", "must be greater than 0 and at most 1");
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return invalid("max_distance", "must be a positive number");
        }
        if !(self.trigger_threshold >= 0.0 && self.trigger_threshold < self.max_distance) {
            return invalid("trigger_threshold", "must be at least 0 and below max_distance");
        }
        if !(self.refreshing_offset.is_finite() && self.refreshing_offset >= 0.0) {
            return invalid("refreshing_offset", "must be at least 0");
        }
        if !(self.units_per_row.is_finite() && self.units_per_row > 0.0) {
            return invalid("units_per_row", "must be a positive number");
        }
        Ok(())
    }

    /// Convert a terminal row into gesture units.
    pub fn row_to_units(&self, row: u16) -> f32 {
        f32::from(row) * self.units_per_row
    }

    /// Convert gesture units back into whole rows for layout.
    pub fn units_to_rows(&self, units: f32) -> u16 {
        if self.units_per_row <= 0.0 || units <= 0.0 {
            return 0;
        }
        (units / self.units_per_row).round().min(f32::from(u16::MAX)) as u16
    }
}
