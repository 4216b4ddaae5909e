//! Configuration system.
//!
//! Loads control tuning from JSON strings (file IO left to the app).

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Tuning for the on-screen controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Degrees of ring drag per discrete piece rotation.
    #[serde(default = "default_rotation_threshold_deg")]
    pub rotation_threshold_deg: f32,
    /// Repeat interval of the directional pad.
    #[serde(default = "default_pad_repeat_ms")]
    pub pad_repeat_ms: u64,
    /// Repeat interval of the fast-drop button.
    #[serde(default = "default_fast_drop_repeat_ms")]
    pub fast_drop_repeat_ms: u64,
    /// Radius around the pad center with no direction.
    #[serde(default = "default_pad_dead_zone")]
    pub pad_dead_zone: f32,
    /// Max knob offset reported for visual feedback.
    #[serde(default = "default_pad_visual_limit")]
    pub pad_visual_limit: f32,
    /// Room pitch turns opposite to the drag.
    #[serde(default = "default_room_pitch_inverted")]
    pub room_pitch_inverted: bool,
}

fn default_rotation_threshold_deg() -> f32 {
    20.0
}

fn default_pad_repeat_ms() -> u64 {
    180
}

fn default_fast_drop_repeat_ms() -> u64 {
    270
}

fn default_pad_dead_zone() -> f32 {
    12.0
}

fn default_pad_visual_limit() -> f32 {
    24.0
}

fn default_room_pitch_inverted() -> bool {
    true
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotation_threshold_deg: default_rotation_threshold_deg(),
            pad_repeat_ms: default_pad_repeat_ms(),
            fast_drop_repeat_ms: default_fast_drop_repeat_ms(),
            pad_dead_zone: default_pad_dead_zone(),
            pad_visual_limit: default_pad_visual_limit(),
            room_pitch_inverted: default_room_pitch_inverted(),
        }
    }
}

impl ControlsConfig {
    /// Parses config from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn pad_repeat(&self) -> Duration {
        Duration::from_millis(self.pad_repeat_ms)
    }

    pub fn fast_drop_repeat(&self) -> Duration {
        Duration::from_millis(self.fast_drop_repeat_ms)
    }

    /// Rejects values the controllers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rotation_threshold_deg.is_finite() && self.rotation_threshold_deg > 0.0) {
            return Err(ConfigError::RotationThreshold);
        }
        if self.pad_repeat_ms == 0 || self.fast_drop_repeat_ms == 0 {
            return Err(ConfigError::RepeatInterval);
        }
        if !(self.pad_dead_zone.is_finite() && self.pad_dead_zone >= 0.0) {
            return Err(ConfigError::DeadZone);
        }
        if !(self.pad_visual_limit.is_finite() && self.pad_visual_limit > 0.0) {
            return Err(ConfigError::VisualLimit);
        }
        Ok(())
    }
}

/// Error type for config validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RotationThreshold,
    RepeatInterval,
    DeadZone,
    VisualLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RotationThreshold => write!(f, "rotation threshold must be positive"),
            ConfigError::RepeatInterval => write!(f, "repeat intervals must be non-zero"),
            ConfigError::DeadZone => write!(f, "pad dead zone must be non-negative"),
            ConfigError::VisualLimit => write!(f, "pad visual limit must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = ControlsConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ControlsConfig::default());
        assert_eq!(cfg.pad_repeat(), Duration::from_millis(180));
        assert_eq!(cfg.fast_drop_repeat(), Duration::from_millis(270));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = ControlsConfig::from_json_str(r#"{"pad_dead_zone": 8.5, "pad_repeat_ms": 100}"#)
            .unwrap();
        assert_eq!(cfg.pad_dead_zone, 8.5);
        assert_eq!(cfg.pad_repeat_ms, 100);
        assert_eq!(cfg.rotation_threshold_deg, 20.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = ControlsConfig {
            rotation_threshold_deg: 0.0,
            ..ControlsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::RotationThreshold));

        let cfg = ControlsConfig {
            fast_drop_repeat_ms: 0,
            ..ControlsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::RepeatInterval));

        let cfg = ControlsConfig {
            pad_dead_zone: -1.0,
            ..ControlsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::DeadZone));
    }
}
