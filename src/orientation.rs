//! Hand orientation from three palm keypoints.
//!
//! The wrist and the index/middle knuckles span the palm. From them we build
//! an orthonormal `{right, up, forward}` frame, place the axes as the columns
//! of a rotation matrix and convert that matrix to a quaternion.

use crate::{
    geometry::{normalize, normalize_or, Basis},
    keypoints::{landmarks, HandKeypointSet},
};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Rotation quaternion, scalar first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The no-rotation quaternion (1, 0, 0, 0)
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[must_use]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Convert a rotation matrix with the trace method.
    ///
    /// The branch is chosen by the largest of the trace and the three
    /// diagonal entries so the square root argument stays well away from zero.
    #[must_use]
    pub fn from_rotation_matrix(m: &Matrix3<f64>) -> Self {
        let (m00, m01, m02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
        let (m10, m11, m12) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
        let (m20, m21, m22) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(0.25 / s, (m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        }
    }
}

/// Stateless hand orientation estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationEstimator;

impl OrientationEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimate hand orientation.
    ///
    /// Returns identity when the wrist coincides with the middle knuckle,
    /// and for incomplete keypoint sets (callers are expected to skip those).
    #[must_use]
    pub fn estimate_orientation(&self, keypoints: &HandKeypointSet) -> Quaternion {
        if !keypoints.is_valid() {
            return Quaternion::IDENTITY;
        }

        match Self::palm_basis(keypoints) {
            Some(basis) => {
                let rotation = Matrix3::from_columns(&[basis.right, basis.up, basis.forward]);
                Quaternion::from_rotation_matrix(&rotation)
            }
            None => {
                log::debug!("Wrist and middle MCP coincide, orientation undefined");
                Quaternion::IDENTITY
            }
        }
    }

    /// Palm frame: forward is wrist → middle MCP, right is index MCP → middle MCP
    #[must_use]
    pub fn palm_basis(keypoints: &HandKeypointSet) -> Option<Basis> {
        let wrist = keypoints.vector(landmarks::WRIST)?;
        let index_mcp = keypoints.vector(landmarks::INDEX_MCP)?;
        let middle_mcp = keypoints.vector(landmarks::MIDDLE_MCP)?;

        let forward = normalize(&(middle_mcp - wrist))?;
        let right = normalize_or(&(middle_mcp - index_mcp), Vector3::x());
        Some(Basis::orthogonalize(forward, right))
    }
}
