//! Hand pose bridge: turns tracked hand keypoints into controller poses.
//!
//! Given the 21 keypoints an external hand detector reports per hand, this
//! library derives:
//! - a calibrated 3D position, with depth estimated from apparent palm size
//! - an orientation quaternion built from the palm's orthonormal frame
//! - a discrete gesture plus trigger and grip values
//!
//! and encodes the result as a single line of the controller text protocol.
//! Every frame is computed on its own; nothing is smoothed or tracked
//! across frames.
//!
//! # Examples
//!
//! ## Single Hand
//!
//! ```
//! use hand_pose_bridge::{
//!     hand_pose::{DetectedHand, Handedness, PoseAssembler},
//!     keypoints::{HandKeypointSet, Keypoint},
//!     protocol,
//! };
//!
//! // 21 keypoints from the detector (all at one spot here)
//! let keypoints = HandKeypointSet::new(vec![Keypoint::new(0.75, 0.25, 0.0); 21]);
//! let hand = DetectedHand::new(Handedness::Left, keypoints);
//!
//! let assembler = PoseAssembler::default();
//! if let Some(pose) = assembler.assemble(&hand) {
//!     let line = protocol::encode(&pose);
//!     assert!(line.starts_with("HAND:LEFT,X:0.5000,Y:0.5000,Z:-0.5000,QW:1.0000"));
//!     assert!(line.ends_with("GESTURE:PINCH\n"));
//! }
//! ```
//!
//! ## Streaming Frames
//!
//! ```no_run
//! use hand_pose_bridge::{app::BridgeApp, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("config.yaml")?;
//! config.validate()?;
//!
//! let app = BridgeApp::new(&config);
//! let stdin = std::io::stdin();
//! let stats = app.run(stdin.lock(), std::io::stdout())?;
//! println!("{} records from {} frames", stats.records, stats.frames);
//! # Ok(())
//! # }
//! ```

/// Vector primitives shared by the estimators
pub mod geometry;

/// Hand keypoints and the 21-point topology
pub mod keypoints;

/// Position calibration and its editing rules
pub mod calibration;

/// Hand position estimation with palm-size depth
pub mod pose_estimation;

/// Hand orientation as a quaternion
pub mod orientation;

/// Finger extension tests and gesture classification
pub mod gesture;

/// Hand pose records and the pose assembler
pub mod hand_pose;

/// Controller line protocol
pub mod protocol;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
