//! Per-hand pose records and the assembler that builds them.

use crate::{
    calibration::CalibrationTransform,
    constants::DEFAULT_MAX_HANDS,
    gesture::{Gesture, GestureClassifier, GestureConfig},
    keypoints::HandKeypointSet,
    orientation::{OrientationEstimator, Quaternion},
    pose_estimation::PoseEstimator,
    Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which hand, as labelled by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Map a detector label. Only `"Left"` is left; anything else is right.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "Left" {
            Handedness::Left
        } else {
            Handedness::Right
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "LEFT",
            Handedness::Right => "RIGHT",
        }
    }

    /// Lower-case name for log lines
    #[must_use]
    pub const fn as_lower_str(self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl From<String> for Handedness {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Handedness> for String {
    fn from(hand: Handedness) -> Self {
        match hand {
            Handedness::Left => "Left".to_string(),
            Handedness::Right => "Right".to_string(),
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = Error;

    /// Parse a wire name (`LEFT` / `RIGHT`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEFT" => Ok(Handedness::Left),
            "RIGHT" => Ok(Handedness::Right),
            other => Err(Error::InvalidInput(format!("Unknown hand: {other}"))),
        }
    }
}

/// One detector observation: a keypoint set plus its hand label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedHand {
    pub handedness: Handedness,
    pub keypoints: HandKeypointSet,
}

impl DetectedHand {
    #[must_use]
    pub fn new(handedness: Handedness, keypoints: HandKeypointSet) -> Self {
        Self { handedness, keypoints }
    }
}

/// Semantic pose of one hand in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub handedness: Handedness,
    pub position: [f64; 3],
    pub orientation: Quaternion,
    pub gesture: Gesture,
    pub trigger: f64,
    pub grip: f64,
    pub detected: bool,
}

impl HandPose {
    /// Neutral placeholder for a hand that is not tracked
    #[must_use]
    pub fn undetected(handedness: Handedness) -> Self {
        Self {
            handedness,
            position: [0.0; 3],
            orientation: Quaternion::IDENTITY,
            gesture: Gesture::Open,
            trigger: 0.0,
            grip: 0.0,
            detected: false,
        }
    }
}

/// Runs the position, orientation and gesture estimators on each hand and
/// merges their outputs.
///
/// Holds only immutable configuration, so one assembler can be shared
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct PoseAssembler {
    pose_estimator: PoseEstimator,
    orientation_estimator: OrientationEstimator,
    classifier: GestureClassifier,
    max_hands: usize,
}

impl Default for PoseAssembler {
    fn default() -> Self {
        Self::new(CalibrationTransform::default(), GestureConfig::default())
    }
}

impl PoseAssembler {
    #[must_use]
    pub fn new(calibration: CalibrationTransform, gestures: GestureConfig) -> Self {
        Self {
            pose_estimator: PoseEstimator::new(calibration),
            orientation_estimator: OrientationEstimator::new(),
            classifier: GestureClassifier::new(gestures),
            max_hands: DEFAULT_MAX_HANDS,
        }
    }

    /// Limit the number of hands assembled per frame
    #[must_use]
    pub fn with_max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    #[must_use]
    pub fn max_hands(&self) -> usize {
        self.max_hands
    }

    /// Pose for one hand, or `None` when its keypoint set is incomplete
    #[must_use]
    pub fn assemble(&self, hand: &DetectedHand) -> Option<HandPose> {
        if !hand.keypoints.is_valid() {
            log::warn!(
                "Skipping {} hand with {} keypoints",
                hand.handedness,
                hand.keypoints.len()
            );
            return None;
        }

        let position = self.pose_estimator.estimate_position(&hand.keypoints);
        let orientation = self.orientation_estimator.estimate_orientation(&hand.keypoints);
        let classification = self.classifier.classify(&hand.keypoints);

        Some(HandPose {
            handedness: hand.handedness,
            position: [position.x, position.y, position.z],
            orientation,
            gesture: classification.gesture,
            trigger: classification.actuation.trigger,
            grip: classification.actuation.grip,
            detected: true,
        })
    }

    /// Poses for every hand in a frame.
    ///
    /// At most `max_hands` hands are considered, in detector order, and at
    /// most one pose is produced per hand label.
    #[must_use]
    pub fn assemble_frame(&self, hands: &[DetectedHand]) -> Vec<HandPose> {
        let mut poses: Vec<HandPose> = Vec::with_capacity(hands.len().min(self.max_hands));

        for hand in hands.iter().take(self.max_hands) {
            if poses.iter().any(|p| p.handedness == hand.handedness) {
                log::warn!("Duplicate {} hand in frame, keeping the first", hand.handedness);
                continue;
            }
            if let Some(pose) = self.assemble(hand) {
                poses.push(pose);
            }
        }

        poses
    }
}
