//! Hand keypoints as delivered by the external detector.
//!
//! A hand is 21 ordered keypoints; the index of each point is its
//! anatomical identity.

use crate::constants::NUM_HAND_KEYPOINTS;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Keypoint indices of the 21-point hand topology
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single tracked landmark.
///
/// `x` and `y` are normalized to the image (0..1, y pointing down); `z` is
/// detector-native. Serialized as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Keypoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position as a vector
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Keypoint {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Keypoint> for [f64; 3] {
    fn from(p: Keypoint) -> Self {
        [p.x, p.y, p.z]
    }
}

/// The five digits, each mapped to its (tip, MCP-equivalent) keypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, thumb first
    pub const ALL: [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Keypoint index of the fingertip
    #[must_use]
    pub const fn tip(self) -> usize {
        match self {
            Finger::Thumb => landmarks::THUMB_TIP,
            Finger::Index => landmarks::INDEX_TIP,
            Finger::Middle => landmarks::MIDDLE_TIP,
            Finger::Ring => landmarks::RING_TIP,
            Finger::Pinky => landmarks::PINKY_TIP,
        }
    }

    /// Keypoint index of the base knuckle
    #[must_use]
    pub const fn mcp(self) -> usize {
        match self {
            Finger::Thumb => landmarks::THUMB_MCP,
            Finger::Index => landmarks::INDEX_MCP,
            Finger::Middle => landmarks::MIDDLE_MCP,
            Finger::Ring => landmarks::RING_MCP,
            Finger::Pinky => landmarks::PINKY_MCP,
        }
    }
}

/// One hand's keypoints for one frame.
///
/// The set is only meaningful with exactly 21 points. Other lengths are kept
/// as-is so the estimators can apply their fallbacks instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandKeypointSet {
    points: Vec<Keypoint>,
}

impl HandKeypointSet {
    #[must_use]
    pub fn new(points: Vec<Keypoint>) -> Self {
        Self { points }
    }

    /// True when the set holds exactly 21 keypoints
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points.len() == NUM_HAND_KEYPOINTS
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Keypoint> {
        self.points.get(index).copied()
    }

    /// Keypoint `index` as a vector, if present
    #[must_use]
    pub fn vector(&self, index: usize) -> Option<Vector3<f64>> {
        self.get(index).map(Keypoint::to_vector)
    }

    #[must_use]
    pub fn points(&self) -> &[Keypoint] {
        &self.points
    }
}

impl From<Vec<Keypoint>> for HandKeypointSet {
    fn from(points: Vec<Keypoint>) -> Self {
        Self::new(points)
    }
}
