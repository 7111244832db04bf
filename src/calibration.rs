//! Calibration transform applied to estimated hand positions.
//!
//! The transform is read-only while poses are being produced. Edits go
//! through [`CalibrationTransform::adjust`], which is where the minimum
//! scale is enforced.

use crate::constants::{CALIBRATION_OFFSET_STEP, CALIBRATION_SCALE_STEP, MIN_CALIBRATION_SCALE};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Offset and uniform scale mapping raw positions into user space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationTransform {
    /// Added after scaling, per axis
    pub position_offset: [f64; 3],
    /// Uniform scale factor
    pub scale: f64,
}

impl Default for CalibrationTransform {
    fn default() -> Self {
        Self {
            position_offset: [0.0, 0.0, 0.0],
            scale: 1.0,
        }
    }
}

/// A single calibration edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationAdjustment {
    /// Move the X offset left
    Left,
    /// Move the X offset right
    Right,
    /// Raise the Y offset
    Up,
    /// Lower the Y offset
    Down,
    /// Move the Z offset back (more negative)
    Back,
    /// Move the Z offset forward
    Forward,
    /// Grow the scale by one step
    ScaleUp,
    /// Shrink the scale by one step, never below the minimum
    ScaleDown,
    /// Restore the identity transform
    Reset,
}

impl CalibrationTransform {
    #[must_use]
    pub fn new(position_offset: [f64; 3], scale: f64) -> Self {
        Self { position_offset, scale }
    }

    /// Offset as a vector
    #[must_use]
    pub fn offset(&self) -> Vector3<f64> {
        Vector3::from(self.position_offset)
    }

    /// Map a raw position: `raw * scale + offset`, no clamping
    #[must_use]
    pub fn apply(&self, raw: &Vector3<f64>) -> Vector3<f64> {
        raw * self.scale + self.offset()
    }

    /// Apply one editing step in place
    pub fn adjust(&mut self, adjustment: CalibrationAdjustment) {
        match adjustment {
            CalibrationAdjustment::Left => self.position_offset[0] -= CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::Right => self.position_offset[0] += CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::Up => self.position_offset[1] += CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::Down => self.position_offset[1] -= CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::Back => self.position_offset[2] -= CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::Forward => self.position_offset[2] += CALIBRATION_OFFSET_STEP,
            CalibrationAdjustment::ScaleUp => self.scale += CALIBRATION_SCALE_STEP,
            CalibrationAdjustment::ScaleDown => {
                self.scale = (self.scale - CALIBRATION_SCALE_STEP).max(MIN_CALIBRATION_SCALE);
            }
            CalibrationAdjustment::Reset => *self = Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_scale_then_offset() {
        let calibration = CalibrationTransform::new([0.1, -0.2, 0.3], 2.0);
        let p = calibration.apply(&Vector3::new(1.0, 1.0, -1.0));
        assert!((p - Vector3::new(2.1, 1.8, -1.7)).norm() < 1e-12);
    }

    #[test]
    fn test_identity_apply() {
        let raw = Vector3::new(0.25, -0.5, -0.9);
        assert_eq!(CalibrationTransform::default().apply(&raw), raw);
    }

    #[test]
    fn test_offset_adjustments() {
        let mut calibration = CalibrationTransform::default();
        calibration.adjust(CalibrationAdjustment::Right);
        calibration.adjust(CalibrationAdjustment::Right);
        calibration.adjust(CalibrationAdjustment::Down);
        calibration.adjust(CalibrationAdjustment::Forward);
        assert!((calibration.position_offset[0] - 0.1).abs() < 1e-12);
        assert!((calibration.position_offset[1] + 0.05).abs() < 1e-12);
        assert!((calibration.position_offset[2] - 0.05).abs() < 1e-12);

        calibration.adjust(CalibrationAdjustment::Left);
        calibration.adjust(CalibrationAdjustment::Up);
        calibration.adjust(CalibrationAdjustment::Back);
        assert!((calibration.position_offset[0] - 0.05).abs() < 1e-12);
        assert!(calibration.position_offset[1].abs() < 1e-12);
        assert!(calibration.position_offset[2].abs() < 1e-12);
    }

    #[test]
    fn test_scale_floor() {
        let mut calibration = CalibrationTransform::default();
        for _ in 0..20 {
            calibration.adjust(CalibrationAdjustment::ScaleDown);
        }
        assert_eq!(calibration.scale, MIN_CALIBRATION_SCALE);

        calibration.adjust(CalibrationAdjustment::ScaleUp);
        assert!((calibration.scale - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut calibration = CalibrationTransform::new([1.0, 2.0, 3.0], 4.0);
        calibration.adjust(CalibrationAdjustment::Reset);
        assert_eq!(calibration, CalibrationTransform::default());
    }
}
