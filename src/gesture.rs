//! Rule-based gesture classification from finger extension tests.
//!
//! Each finger is tested by comparing how far its tip and its knuckle sit
//! from the wrist. The resulting five flags feed a fixed priority chain of
//! gesture rules; the first rule that matches wins.

use crate::{
    constants::{
        DEFAULT_FINGER_EXTENDED_THRESHOLD, DEFAULT_PINCH_THRESHOLD, OPEN_HAND_MIN_EXTENDED, THUMB_EXTENSION_RATIO,
    },
    geometry::distance,
    keypoints::{landmarks, Finger, HandKeypointSet},
    Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete hand gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Pinch,
    Fist,
    Point,
    Peace,
    ThumbsUp,
    Open,
    Unknown,
}

impl Gesture {
    /// Every gesture, in classification priority order
    pub const ALL: [Gesture; 7] = [
        Gesture::Pinch,
        Gesture::Fist,
        Gesture::Point,
        Gesture::Peace,
        Gesture::ThumbsUp,
        Gesture::Open,
        Gesture::Unknown,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Gesture::Pinch => "PINCH",
            Gesture::Fist => "FIST",
            Gesture::Point => "POINT",
            Gesture::Peace => "PEACE",
            Gesture::ThumbsUp => "THUMBS_UP",
            Gesture::Open => "OPEN",
            Gesture::Unknown => "UNKNOWN",
        }
    }

    /// Trigger and grip values implied by the gesture
    #[must_use]
    pub const fn actuation(self) -> Actuation {
        match self {
            Gesture::Point => Actuation::new(0.8, 0.0),
            Gesture::Pinch => Actuation::new(1.0, 0.5),
            Gesture::Fist => Actuation::new(0.0, 1.0),
            _ => Actuation::new(0.0, 0.0),
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown gesture: {s}")))
    }
}

/// Continuous controller values, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Actuation {
    pub trigger: f64,
    pub grip: f64,
}

impl Actuation {
    #[must_use]
    pub const fn new(trigger: f64, grip: f64) -> Self {
        Self { trigger, grip }
    }
}

/// Gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-tip to index-tip distance below which the hand pinches
    pub pinch_threshold: f64,
    /// Tip/MCP wrist-distance ratio above which a non-thumb finger is extended
    pub finger_extended_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            finger_extended_threshold: DEFAULT_FINGER_EXTENDED_THRESHOLD,
        }
    }
}

/// Extension flag per finger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    #[must_use]
    pub fn extended_count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .filter(|&e| e)
            .count()
    }
}

/// Gesture classification result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub gesture: Gesture,
    pub actuation: Actuation,
}

/// Gesture classifier with thresholds fixed at construction
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        log::info!(
            "Initializing GestureClassifier: pinch < {}, extension ratio > {}",
            config.pinch_threshold,
            config.finger_extended_threshold
        );
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify the hand and derive its actuation values
    #[must_use]
    pub fn classify(&self, keypoints: &HandKeypointSet) -> Classification {
        let gesture = self.detect_gesture(keypoints);
        Classification {
            gesture,
            actuation: gesture.actuation(),
        }
    }

    /// Whether `finger` is extended. Always false for incomplete sets.
    ///
    /// The thumb must reach 1.2x its MCP distance from the wrist. Other
    /// fingers only need to exceed the configured ratio of theirs; with the
    /// default 0.6 a partly bent finger still reads as extended.
    #[must_use]
    pub fn is_finger_extended(&self, keypoints: &HandKeypointSet, finger: Finger) -> bool {
        if !keypoints.is_valid() {
            return false;
        }

        let (Some(wrist), Some(tip), Some(mcp)) = (
            keypoints.vector(landmarks::WRIST),
            keypoints.vector(finger.tip()),
            keypoints.vector(finger.mcp()),
        ) else {
            return false;
        };

        let ratio = match finger {
            Finger::Thumb => THUMB_EXTENSION_RATIO,
            _ => self.config.finger_extended_threshold,
        };

        distance(&tip, &wrist) > distance(&mcp, &wrist) * ratio
    }

    /// Extension flags for all five fingers
    #[must_use]
    pub fn finger_states(&self, keypoints: &HandKeypointSet) -> FingerStates {
        FingerStates {
            thumb: self.is_finger_extended(keypoints, Finger::Thumb),
            index: self.is_finger_extended(keypoints, Finger::Index),
            middle: self.is_finger_extended(keypoints, Finger::Middle),
            ring: self.is_finger_extended(keypoints, Finger::Ring),
            pinky: self.is_finger_extended(keypoints, Finger::Pinky),
        }
    }

    /// Thumb tip and index tip closer than the pinch threshold
    #[must_use]
    pub fn detect_pinch(&self, keypoints: &HandKeypointSet) -> bool {
        if !keypoints.is_valid() {
            return false;
        }

        match (
            keypoints.vector(landmarks::THUMB_TIP),
            keypoints.vector(landmarks::INDEX_TIP),
        ) {
            (Some(thumb_tip), Some(index_tip)) => distance(&thumb_tip, &index_tip) < self.config.pinch_threshold,
            _ => false,
        }
    }

    /// Discrete gesture; incomplete sets are `Unknown`
    #[must_use]
    pub fn detect_gesture(&self, keypoints: &HandKeypointSet) -> Gesture {
        if !keypoints.is_valid() {
            return Gesture::Unknown;
        }

        Self::resolve(self.detect_pinch(keypoints), self.finger_states(keypoints))
    }

    /// The priority chain. Rules overlap, so order matters: a hand with
    /// thumb, index and middle extended is `Peace`, not `Unknown`.
    #[must_use]
    pub fn resolve(pinch: bool, f: FingerStates) -> Gesture {
        if pinch {
            return Gesture::Pinch;
        }

        if f.extended_count() == 0 {
            return Gesture::Fist;
        }

        if f.index && !f.middle && !f.ring && !f.pinky && !f.thumb {
            return Gesture::Point;
        }

        // Thumb is deliberately not checked
        if f.index && f.middle && !f.ring && !f.pinky {
            return Gesture::Peace;
        }

        if f.thumb && !f.index && !f.middle && !f.ring && !f.pinky {
            return Gesture::ThumbsUp;
        }

        if f.extended_count() >= OPEN_HAND_MIN_EXTENDED {
            return Gesture::Open;
        }

        Gesture::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> FingerStates {
        FingerStates {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    #[test]
    fn test_priority_chain() {
        assert_eq!(GestureClassifier::resolve(true, states(true, true, true, true, true)), Gesture::Pinch);
        assert_eq!(GestureClassifier::resolve(false, FingerStates::default()), Gesture::Fist);
        assert_eq!(GestureClassifier::resolve(false, states(false, true, false, false, false)), Gesture::Point);
        assert_eq!(GestureClassifier::resolve(false, states(false, true, true, false, false)), Gesture::Peace);
        assert_eq!(GestureClassifier::resolve(false, states(true, true, true, false, false)), Gesture::Peace);
        assert_eq!(GestureClassifier::resolve(false, states(true, false, false, false, false)), Gesture::ThumbsUp);
        assert_eq!(GestureClassifier::resolve(false, states(false, true, true, true, true)), Gesture::Open);
        assert_eq!(GestureClassifier::resolve(false, states(true, true, true, true, true)), Gesture::Open);
        assert_eq!(GestureClassifier::resolve(false, states(true, false, true, true, true)), Gesture::Open);
    }

    #[test]
    fn test_unmatched_states_are_unknown() {
        // Thumb + index: neither Point (thumb out) nor Peace (middle in)
        assert_eq!(GestureClassifier::resolve(false, states(true, true, false, false, false)), Gesture::Unknown);
        assert_eq!(GestureClassifier::resolve(false, states(false, false, true, true, true)), Gesture::Unknown);
        assert_eq!(GestureClassifier::resolve(false, states(false, true, true, true, false)), Gesture::Unknown);
    }

    #[test]
    fn test_actuation_table() {
        assert_eq!(Gesture::Point.actuation(), Actuation::new(0.8, 0.0));
        assert_eq!(Gesture::Pinch.actuation(), Actuation::new(1.0, 0.5));
        assert_eq!(Gesture::Fist.actuation(), Actuation::new(0.0, 1.0));
        for gesture in [Gesture::Peace, Gesture::ThumbsUp, Gesture::Open, Gesture::Unknown] {
            assert_eq!(gesture.actuation(), Actuation::default());
        }
    }

    #[test]
    fn test_gesture_names_round_trip() {
        for gesture in Gesture::ALL {
            assert_eq!(gesture.as_str().parse::<Gesture>().unwrap(), gesture);
        }
        assert_eq!(Gesture::ThumbsUp.to_string(), "THUMBS_UP");
        assert!("thumbs_up".parse::<Gesture>().is_err());
    }

    #[test]
    fn test_short_set_reports_nothing_extended() {
        let classifier = GestureClassifier::default();
        let hand = HandKeypointSet::new(vec![crate::keypoints::Keypoint::new(0.9, 0.9, 0.0); 5]);
        assert_eq!(classifier.finger_states(&hand), FingerStates::default());
        assert!(!classifier.detect_pinch(&hand));
        assert_eq!(classifier.detect_gesture(&hand), Gesture::Unknown);
    }
}
