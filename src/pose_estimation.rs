use crate::{
    calibration::CalibrationTransform,
    constants::{DEPTH_BASE, DEPTH_PER_PALM_SIZE, FALLBACK_PALM_SIZE},
    geometry::distance,
    keypoints::{landmarks, HandKeypointSet, Keypoint},
};
use nalgebra::Vector3;

/// Wrist position assumed when the set has no keypoints at all (image centre)
const CENTERED_WRIST: Keypoint = Keypoint::new(0.5, 0.5, 0.0);

/// Hand position estimator.
///
/// Places the hand at its wrist keypoint in a centered `[-1, 1]` frame and
/// derives depth from apparent palm size, since the detector's own `z` is
/// relative to the wrist and carries no absolute distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseEstimator {
    calibration: CalibrationTransform,
}

impl PoseEstimator {
    /// Create an estimator bound to a calibration for its whole lifetime
    #[must_use]
    pub fn new(calibration: CalibrationTransform) -> Self {
        log::info!(
            "Initializing PoseEstimator with offset {:?}, scale {}",
            calibration.position_offset,
            calibration.scale
        );
        Self { calibration }
    }

    #[must_use]
    pub fn calibration(&self) -> &CalibrationTransform {
        &self.calibration
    }

    /// Estimate the calibrated 3D hand position
    #[must_use]
    pub fn estimate_position(&self, keypoints: &HandKeypointSet) -> Vector3<f64> {
        self.calibration.apply(&Self::raw_position(keypoints))
    }

    /// Uncalibrated position: centered x/y with y pointing up, heuristic z
    #[must_use]
    pub fn raw_position(keypoints: &HandKeypointSet) -> Vector3<f64> {
        let wrist = keypoints.get(landmarks::WRIST).unwrap_or(CENTERED_WRIST);
        let x = (wrist.x - 0.5) * 2.0;
        let y = -(wrist.y - 0.5) * 2.0;
        let z = Self::depth_from_palm_size(Self::palm_size(keypoints));
        Vector3::new(x, y, z)
    }

    /// Mean of the wrist / index-MCP / pinky-MCP pairwise distances
    #[must_use]
    pub fn palm_size(keypoints: &HandKeypointSet) -> f64 {
        if !keypoints.is_valid() {
            return FALLBACK_PALM_SIZE;
        }

        match (
            keypoints.vector(landmarks::WRIST),
            keypoints.vector(landmarks::INDEX_MCP),
            keypoints.vector(landmarks::PINKY_MCP),
        ) {
            (Some(wrist), Some(index_mcp), Some(pinky_mcp)) => {
                (distance(&wrist, &index_mcp) + distance(&wrist, &pinky_mcp) + distance(&index_mcp, &pinky_mcp))
                    / 3.0
            }
            _ => FALLBACK_PALM_SIZE,
        }
    }

    /// Larger palms are closer to the viewer, which is more negative z
    #[must_use]
    pub fn depth_from_palm_size(palm_size: f64) -> f64 {
        DEPTH_BASE - palm_size * DEPTH_PER_PALM_SIZE
    }
}
