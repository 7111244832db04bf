//! Gesture classification on synthetic hands


use hand_pose_bridge::{
    gesture::{Actuation, FingerStates, Gesture, GestureClassifier, GestureConfig},
    keypoints::{landmarks, Finger, HandKeypointSet, Keypoint},
};
use test_helpers::*;

#[test]
fn test_fixture_finger_states() {
    let classifier = GestureClassifier::default();

    assert_eq!(classifier.finger_states(&fist()), FingerStates::default());
    assert_eq!(classifier.finger_states(&open_hand()).extended_count(), 5);

    let states = classifier.finger_states(&peace());
    assert!(states.index && states.middle);
    assert!(!states.thumb && !states.ring && !states.pinky);
}

#[test]
fn test_canonical_gestures() {
    let classifier = GestureClassifier::default();
    let cases = [
        (fist(), Gesture::Fist),
        (open_hand(), Gesture::Open),
        (pointing(), Gesture::Point),
        (peace(), Gesture::Peace),
        (thumbs_up(), Gesture::ThumbsUp),
        (pinching(), Gesture::Pinch),
    ];

    for (hand, expected) in cases {
        assert_eq!(classifier.detect_gesture(&hand), expected);
    }
}

#[test]
fn test_fist_actuation() {
    let result = GestureClassifier::default().classify(&fist());
    assert_eq!(result.gesture, Gesture::Fist);
    assert_eq!(result.actuation.grip, 1.0);
    assert_eq!(result.actuation.trigger, 0.0);
}

#[test]
fn test_point_actuation() {
    let result = GestureClassifier::default().classify(&pointing());
    assert_eq!(result.gesture, Gesture::Point);
    assert_eq!(result.actuation, Actuation::new(0.8, 0.0));
}

#[test]
fn test_pinch_actuation() {
    let result = GestureClassifier::default().classify(&pinching());
    assert_eq!(result.actuation, Actuation::new(1.0, 0.5));
}

#[test]
fn test_peace_ignores_thumb() {
    let classifier = GestureClassifier::default();
    assert_eq!(classifier.detect_gesture(&hand([true, true, true, false, false])), Gesture::Peace);
}

#[test]
fn test_thumb_and_index_is_unknown() {
    let classifier = GestureClassifier::default();
    assert_eq!(classifier.detect_gesture(&hand([true, true, false, false, false])), Gesture::Unknown);
}

#[test]
fn test_four_fingers_without_thumb_is_open() {
    let classifier = GestureClassifier::default();
    assert_eq!(classifier.detect_gesture(&hand([false, true, true, true, true])), Gesture::Open);
}

#[test]
fn test_bent_finger_still_counts_as_extended() {
    // Index tip pulled in to 70% of the knuckle's distance from the wrist:
    // above the 0.6 ratio, so it still reads as extended.
    let mut points = hand_points([false; 5]);
    let wrist = points[landmarks::WRIST];
    let mcp = points[landmarks::INDEX_MCP];
    points[landmarks::INDEX_TIP] = Keypoint::new(
        wrist.x + (mcp.x - wrist.x) * 0.7,
        wrist.y + (mcp.y - wrist.y) * 0.7,
        0.0,
    );
    let hand = HandKeypointSet::new(points);

    let classifier = GestureClassifier::default();
    assert!(classifier.is_finger_extended(&hand, Finger::Index));
    assert_eq!(classifier.detect_gesture(&hand), Gesture::Point);

    // A stricter ratio flips it back
    let strict = GestureClassifier::new(GestureConfig {
        finger_extended_threshold: 1.0,
        ..GestureConfig::default()
    });
    assert!(!strict.is_finger_extended(&hand, Finger::Index));
    assert_eq!(strict.detect_gesture(&hand), Gesture::Fist);
}

#[test]
fn test_thumb_uses_fixed_ratio() {
    // Thumb tip at 1.1x its MCP distance: below 1.2x, so not extended,
    // whatever the configured ratio for the other fingers is.
    let mut points = hand_points([false; 5]);
    let wrist = points[landmarks::WRIST];
    let mcp = points[landmarks::THUMB_MCP];
    points[landmarks::THUMB_TIP] = Keypoint::new(
        wrist.x + (mcp.x - wrist.x) * 1.1,
        wrist.y + (mcp.y - wrist.y) * 1.1,
        0.0,
    );
    let hand = HandKeypointSet::new(points);

    let lenient = GestureClassifier::new(GestureConfig {
        finger_extended_threshold: 0.1,
        ..GestureConfig::default()
    });
    assert!(!lenient.is_finger_extended(&hand, Finger::Thumb));
}

#[test]
fn test_pinch_threshold_is_configurable() {
    let mut points = hand_points([true; 5]);
    points[landmarks::THUMB_TIP] = Keypoint::new(0.40, 0.55, 0.0);
    points[landmarks::INDEX_TIP] = Keypoint::new(0.43, 0.55, 0.0);
    let hand = HandKeypointSet::new(points);

    // 0.03 apart
    assert!(GestureClassifier::default().detect_pinch(&hand));
    let tight = GestureClassifier::new(GestureConfig {
        pinch_threshold: 0.02,
        ..GestureConfig::default()
    });
    assert!(!tight.detect_pinch(&hand));
    assert_eq!(tight.detect_gesture(&hand), Gesture::Open);
}

#[test]
fn test_pinch_dominates_fist() {
    let mut points = hand_points([false; 5]);
    points[landmarks::THUMB_TIP] = points[landmarks::INDEX_TIP];
    let hand = HandKeypointSet::new(points);
    assert_eq!(GestureClassifier::default().detect_gesture(&hand), Gesture::Pinch);
}
