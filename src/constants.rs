//! Constants used throughout the pipeline

/// Number of keypoints in a complete hand
pub const NUM_HAND_KEYPOINTS: usize = 21;

/// Palm size assumed when the keypoint set is incomplete
pub const FALLBACK_PALM_SIZE: f64 = 0.1;

/// Depth of a hand with zero apparent palm size
pub const DEPTH_BASE: f64 = -0.5;

/// Depth change per unit of apparent palm size
pub const DEPTH_PER_PALM_SIZE: f64 = 2.0;

/// Thumb tip must be this many times farther from the wrist than its MCP
pub const THUMB_EXTENSION_RATIO: f64 = 1.2;

/// Default gesture thresholds
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;
pub const DEFAULT_FINGER_EXTENDED_THRESHOLD: f64 = 0.6;

/// Extended-finger count at which a hand reads as open
pub const OPEN_HAND_MIN_EXTENDED: usize = 4;

/// Calibration editing steps
pub const CALIBRATION_OFFSET_STEP: f64 = 0.05;
pub const CALIBRATION_SCALE_STEP: f64 = 0.1;

/// Lower bound on calibration scale, enforced when editing
pub const MIN_CALIBRATION_SCALE: f64 = 0.1;

/// Default number of hands reported per frame
pub const DEFAULT_MAX_HANDS: usize = 2;
