//! Vector primitives shared by the estimators.
//!
//! All math runs on `nalgebra::Vector3<f64>`; keypoints are converted on
//! the way in.

use nalgebra::Vector3;

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a - b).norm()
}

/// Normalize `v`, or `None` if it has zero length
#[must_use]
pub fn normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    v.try_normalize(0.0)
}

/// Normalize `v`, substituting `fallback` if it has zero length
#[must_use]
pub fn normalize_or(v: &Vector3<f64>, fallback: Vector3<f64>) -> Vector3<f64> {
    normalize(v).unwrap_or(fallback)
}

/// Cross product `a × b`
#[must_use]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// An orthonormal frame, stored as the three axes of a hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    /// Lateral axis (across the knuckles)
    pub right: Vector3<f64>,
    /// Axis out of the back of the hand
    pub up: Vector3<f64>,
    /// Axis from wrist toward the fingers
    pub forward: Vector3<f64>,
}

impl Basis {
    /// Build a right-handed basis from a unit `forward` and an approximate
    /// `right`.
    ///
    /// `up` is `forward × right` (or +Y if the two are parallel) and `right`
    /// is then recomputed as `up × forward`, so the result is orthonormal
    /// even when `right` was not perpendicular to `forward`.
    #[must_use]
    pub fn orthogonalize(forward: Vector3<f64>, right: Vector3<f64>) -> Self {
        let up = normalize_or(&cross(&forward, &right), Vector3::y());
        let right = cross(&up, &forward);
        Self { right, up, forward }
    }
}
