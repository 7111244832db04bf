//! Line protocol between the tracker and the controller driver.
//!
//! One record per hand per frame:
//!
//! ```text
//! HAND:LEFT,X:0.5000,Y:0.3000,Z:-0.2000,QW:1.0000,QX:0.0000,QY:0.0000,QZ:0.0000,TRIGGER:0.80,GRIP:0.00,GESTURE:POINT
//! ```
//!
//! Field order is fixed. Positions and quaternion components carry four
//! decimals, trigger and grip two.

use crate::{
    gesture::Gesture,
    hand_pose::{HandPose, Handedness},
    orientation::Quaternion,
    Error, Result,
};
use std::collections::HashMap;

/// Encode a pose as one newline-terminated record
#[must_use]
pub fn encode(pose: &HandPose) -> String {
    let [x, y, z] = pose.position;
    let q = pose.orientation;
    format!(
        "HAND:{},X:{x:.4},Y:{y:.4},Z:{z:.4},QW:{:.4},QX:{:.4},QY:{:.4},QZ:{:.4},TRIGGER:{:.2},GRIP:{:.2},GESTURE:{}\n",
        pose.handedness, q.w, q.x, q.y, q.z, pose.trigger, pose.grip, pose.gesture
    )
}

/// Split a record into its key/value pairs.
///
/// Tokens are separated by `,` and split at their first `:`; tokens without
/// a colon are ignored and later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_fields(line: &str) -> HashMap<&str, &str> {
    line.trim_end_matches(['\r', '\n'])
        .split(',')
        .filter_map(|token| token.split_once(':'))
        .collect()
}

/// Decode a full record back into a pose
///
/// # Errors
///
/// Returns an error if any field is missing or fails to parse
pub fn decode(line: &str) -> Result<HandPose> {
    let fields = parse_fields(line);

    let field = |key: &str| {
        fields
            .get(key)
            .copied()
            .ok_or_else(|| Error::ProtocolError(format!("Missing field {key}")))
    };
    let number = |key: &str| -> Result<f64> {
        let value = field(key)?;
        value
            .parse::<f64>()
            .map_err(|e| Error::ProtocolError(format!("Invalid {key} value {value:?}: {e}")))
    };

    let handedness: Handedness = field("HAND")?
        .parse()
        .map_err(|e: Error| Error::ProtocolError(e.to_string()))?;
    let gesture: Gesture = field("GESTURE")?
        .parse()
        .map_err(|e: Error| Error::ProtocolError(e.to_string()))?;

    Ok(HandPose {
        handedness,
        position: [number("X")?, number("Y")?, number("Z")?],
        orientation: Quaternion::new(number("QW")?, number("QX")?, number("QY")?, number("QZ")?),
        gesture,
        trigger: number("TRIGGER")?,
        grip: number("GRIP")?,
        detected: true,
    })
}
