//! Bridge driver: detector frames in, protocol records out.
//!
//! Each input line is one JSON frame from the external hand detector:
//!
//! ```text
//! {"hands":[{"handedness":"Left","keypoints":[[0.51,0.80,0.0], ...]}]}
//! ```
//!
//! Every assembled hand becomes one protocol line on the output. Delivering
//! those lines to the driver (socket, pipe, ...) is left to whatever the
//! output is connected to.

use crate::{
    config::Config,
    error::Result,
    hand_pose::{DetectedHand, HandPose, PoseAssembler},
    protocol,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// One detector frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Hands detected in this frame, in detector order
    #[serde(default)]
    pub hands: Vec<DetectedHand>,
}

impl Frame {
    /// Parse one input line
    pub fn from_json(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Counters for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Frames parsed and processed
    pub frames: usize,
    /// Non-blank lines that could not be parsed
    pub skipped_lines: usize,
    /// Protocol records written
    pub records: usize,
}

/// Main application struct
pub struct BridgeApp {
    assembler: PoseAssembler,
    log_gestures: bool,
}

impl BridgeApp {
    /// Create a bridge from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        info!("Initializing hand pose bridge (max {} hands)", config.tracking.max_hands);
        Self {
            assembler: config.pose_assembler(),
            log_gestures: config.log_gestures(),
        }
    }

    #[must_use]
    pub fn assembler(&self) -> &PoseAssembler {
        &self.assembler
    }

    /// Assemble the poses of one frame
    #[must_use]
    pub fn process_frame(&self, frame: &Frame) -> Vec<HandPose> {
        let poses = self.assembler.assemble_frame(&frame.hands);

        if self.log_gestures {
            for pose in &poses {
                info!(
                    "{}: {} T:{:.2} G:{:.2}",
                    pose.handedness.as_lower_str(),
                    pose.gesture,
                    pose.trigger,
                    pose.grip
                );
            }
        }

        poses
    }

    /// Stream frames from `input` to protocol lines on `output` until EOF
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    /// Lines that are not UTF-8 or not a frame are logged and skipped.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping line {}: {}", line_no, e);
                    stats.skipped_lines += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let frame = match Frame::from_json(line) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Skipping line {}: {}", line_no, e);
                    stats.skipped_lines += 1;
                    continue;
                }
            };

            let poses = self.process_frame(&frame);
            for pose in &poses {
                output.write_all(protocol::encode(pose).as_bytes())?;
            }
            output.flush()?;

            stats.frames += 1;
            stats.records += poses.len();
        }

        debug!(
            "Processed {} frames, wrote {} records, skipped {} lines",
            stats.frames, stats.records, stats.skipped_lines
        );

        Ok(stats)
    }
}
