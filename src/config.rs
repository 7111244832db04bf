//! Configuration management for the hand pose bridge.
//!
//! Files are YAML, except that paths ending in `.json` are read and written
//! as JSON so tracker `config.json` files stay usable by the tracker.
//! Sections this crate does not use (camera, network, ...) are carried
//! through a load/save cycle untouched.

use crate::{
    calibration::CalibrationTransform,
    constants::{DEFAULT_MAX_HANDS, MIN_CALIBRATION_SCALE},
    gesture::GestureConfig,
    hand_pose::PoseAssembler,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Gesture thresholds
    pub gestures: GestureConfig,

    /// Position calibration
    pub calibration: CalibrationTransform,

    /// Tracking limits
    pub tracking: TrackingConfig,

    /// Output behaviour
    pub output: OutputConfig,

    /// Tracker debug section; only `log_gestures` is read here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugConfig>,

    /// Sections not used by this crate
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Tracking limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Maximum number of hands reported per frame
    pub max_hands: usize,

    /// Detector settings (confidence, model complexity, ...)
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Log each hand's gesture and actuation values
    pub log_gestures: bool,
}

/// The tracker's `debug` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    pub log_gestures: bool,

    /// Display switches (show_video, show_fps, ...)
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_hands: DEFAULT_MAX_HANDS,
            extra: Mapping::new(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl Config {
    /// Load configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse configuration text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration, as JSON for `.json` paths and YAML otherwise
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)
                .map(|mut json| {
                    json.push('\n');
                    json
                })
                .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?
        } else {
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Whether per-hand gesture logging is on, from either `output` or the
    /// tracker's `debug` section
    #[must_use]
    pub fn log_gestures(&self) -> bool {
        self.output.log_gestures || self.debug.as_ref().is_some_and(|d| d.log_gestures)
    }

    /// Build the pose assembler described by this configuration
    #[must_use]
    pub fn pose_assembler(&self) -> PoseAssembler {
        PoseAssembler::new(self.calibration, self.gestures).with_max_hands(self.tracking.max_hands)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate gesture thresholds
        if !(self.gestures.pinch_threshold.is_finite() && self.gestures.pinch_threshold > 0.0) {
            return Err(Error::ConfigError(
                "Pinch threshold must be a positive number".to_string(),
            ));
        }
        if !(self.gestures.finger_extended_threshold.is_finite() && self.gestures.finger_extended_threshold > 0.0) {
            return Err(Error::ConfigError(
                "Finger extension threshold must be a positive number".to_string(),
            ));
        }

        // Validate calibration
        if !(self.calibration.scale.is_finite() && self.calibration.scale >= MIN_CALIBRATION_SCALE) {
            return Err(Error::ConfigError(format!(
                "Calibration scale must be at least {MIN_CALIBRATION_SCALE}"
            )));
        }
        if self.calibration.position_offset.iter().any(|v| !v.is_finite()) {
            return Err(Error::ConfigError(
                "Calibration offsets must be finite".to_string(),
            ));
        }

        // Validate tracking limits
        if self.tracking.max_hands == 0 {
            return Err(Error::ConfigError("Max hands must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Pose Bridge Configuration

# Gesture detection thresholds
gestures:
  pinch_threshold: 0.05
  finger_extended_threshold: 0.6

# Position calibration (raw * scale + offset)
calibration:
  position_offset: [0.0, 0.0, 0.0]
  scale: 1.0

# Tracking limits
tracking:
  max_hands: 2

# Output
output:
  log_gestures: false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let config = Config::from_yaml_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tracker_json_config() {
        let json = r#"{
            "camera": {"device_id": 0, "width": 640, "height": 480, "fps": 60, "flip_horizontal": true},
            "tracking": {"max_hands": 1, "detection_confidence": 0.7},
            "network": {"host": "127.0.0.1", "port": 65432},
            "gestures": {"pinch_threshold": 0.04, "finger_extended_threshold": 0.7},
            "calibration": {"position_offset": [0.1, -0.2, 0.3], "scale": 1.5},
            "debug": {"show_video": true, "log_gestures": true}
        }"#;
        let config = Config::from_yaml_str(json).unwrap();
        assert_eq!(config.tracking.max_hands, 1);
        assert_eq!(config.gestures.pinch_threshold, 0.04);
        assert_eq!(config.gestures.finger_extended_threshold, 0.7);
        assert_eq!(config.calibration.position_offset, [0.1, -0.2, 0.3]);
        assert_eq!(config.calibration.scale, 1.5);
        assert!(config.log_gestures());
        assert!(config.extra.contains_key("camera"));
        assert!(config.extra.contains_key("network"));
        assert!(config.tracking.extra.contains_key("detection_confidence"));
        assert_eq!(
            config.debug.as_ref().map(|d| d.extra.contains_key("show_video")),
            Some(true)
        );
    }

    #[test]
    fn test_log_gestures_from_either_section() {
        assert!(!Config::default().log_gestures());
        assert!(Config::from_yaml_str("output:\n  log_gestures: true\n").unwrap().log_gestures());
        assert!(Config::from_yaml_str("debug:\n  log_gestures: true\n").unwrap().log_gestures());
        assert!(!Config::from_yaml_str("debug:\n  show_video: true\n").unwrap().log_gestures());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_yaml_str("calibration:\n  position_offset: [0.0, 0.5, 0.0]\n  scale: 2.0\n").unwrap();
        assert_eq!(config.gestures, GestureConfig::default());
        assert_eq!(config.tracking.max_hands, DEFAULT_MAX_HANDS);
        assert_eq!(config.calibration.scale, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.calibration.scale = 0.05;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gestures.pinch_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gestures.finger_extended_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.calibration.position_offset[1] = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tracking.max_hands = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(Config::from_yaml_str("gestures: [1, 2"), Err(Error::ConfigError(_))));
    }
}
