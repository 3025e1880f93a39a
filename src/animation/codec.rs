//! Saved animation format.
//!
//! An animation is a JSON array of records in timeline order:
//!
//! ```json
//! [
//!   { "timestampMs": 1700000000000, "jointAngles": [ { "base": 0.0, "mid": 0.0, "tip": 0.0 }, ... ] },
//!   ...
//! ]
//! ```
//!
//! Older saves used `timestamp` and `angles` as keys; both are still accepted
//! on read. Everything else about the shape is checked: a missing field, a
//! wrong type or a record with the wrong number of limbs rejects the whole file.

use serde::{Deserialize, Serialize};

use crate::animation::keyframe::Keyframe;
use crate::animation::pose::{JointAngles, PoseState};
use crate::errors::{RigError, Result};

#[derive(Debug, Deserialize)]
struct KeyframeRecord {
    #[serde(rename = "timestampMs", alias = "timestamp")]
    timestamp_ms: u64,
    #[serde(rename = "jointAngles", alias = "angles")]
    joint_angles: Vec<JointAngles>,
}

#[derive(Serialize)]
struct KeyframeRecordRef<'a> {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    #[serde(rename = "jointAngles")]
    joint_angles: &'a [JointAngles],
}

/// Encodes keyframes in timeline order.
pub fn encode(keyframes: &[Keyframe]) -> Result<Vec<u8>> {
    let records: Vec<KeyframeRecordRef<'_>> = keyframes
        .iter()
        .map(|kf| KeyframeRecordRef {
            timestamp_ms: kf.timestamp_ms,
            joint_angles: kf.pose.limbs(),
        })
        .collect();

    serde_json::to_vec(&records).map_err(|e| RigError::MalformedAnimation(e.to_string()))
}

/// Decodes keyframes, requiring every record to hold exactly `limb_count` limbs.
pub fn decode(bytes: &[u8], limb_count: usize) -> Result<Vec<Keyframe>> {
    let records: Vec<KeyframeRecord> =
        serde_json::from_slice(bytes).map_err(|e| RigError::MalformedAnimation(e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            if record.joint_angles.len() != limb_count {
                return Err(RigError::MalformedAnimation(format!(
                    "keyframe {i} has {} limbs, expected {limb_count}",
                    record.joint_angles.len()
                )));
            }
            if let Some(bad) = record
                .joint_angles
                .iter()
                .position(|a| !(a.base.is_finite() && a.mid.is_finite() && a.tip.is_finite()))
            {
                return Err(RigError::MalformedAnimation(format!(
                    "keyframe {i} limb {bad} has a non-finite angle"
                )));
            }
            Ok(Keyframe {
                timestamp_ms: record.timestamp_ms,
                pose: PoseState::from_limbs(record.joint_angles),
            })
        })
        .collect()
}
