//! Error Types
//!
//! This module defines the error type shared by every part of the rig engine.
//!
//! # Overview
//!
//! [`RigError`] covers three families of failure:
//! - Programming errors in fixed data (a degenerate rotation axis, a broken skeleton layout)
//! - Rejected user actions (playing without enough keyframes, editing a joint during playback)
//! - Malformed external data (a saved animation that does not parse or has the wrong shape)
//!
//! None of them are fatal to the process. Callers at the input boundary report
//! the error and leave engine state as it was.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marionette::errors::{RigError, Result};
//!
//! fn load(bytes: &[u8]) -> Result<()> {
//!     let frames = KeyframeStore::deserialize(bytes, 8)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the rig engine.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Transform & Layout Errors
    // ========================================================================
    /// A rotation axis had zero length or non-finite components.
    #[error("Invalid rotation axis: [{x}, {y}, {z}]")]
    InvalidAxis {
        /// X component of the rejected axis
        x: f32,
        /// Y component of the rejected axis
        y: f32,
        /// Z component of the rejected axis
        z: f32,
    },

    /// The skeleton layout constants are unusable.
    #[error("Invalid skeleton layout: {0}")]
    InvalidLayout(String),

    /// Camera projection parameters are unusable.
    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    // ========================================================================
    // Playback Errors
    // ========================================================================
    /// Playback needs at least two keyframes to interpolate between.
    #[error("Not enough keyframes to play animation: need at least 2, found {found}")]
    InsufficientKeyframes {
        /// Number of keyframes currently stored
        found: usize,
    },

    /// Speed multipliers must be finite and strictly positive.
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    /// Joint angles are derived from keyframes while an animation plays.
    #[error("Pose is driven by playback; stop the animation before editing joints")]
    PoseLocked,

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A limb index outside `0..count`.
    #[error("Limb index out of range: {index} (limb count: {count})")]
    LimbOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of limbs in the pose
        count: usize,
    },

    /// Angles from user input must be finite degrees.
    #[error("Invalid angle: {0} (angles must be finite degrees)")]
    InvalidAngle(f32),

    /// An unknown joint name.
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// A saved animation could not be parsed or had the wrong shape.
    #[error("Malformed animation: {0}")]
    MalformedAnimation(String),

    /// Settings JSON could not be parsed.
    #[error("Settings parse error: {0}")]
    Settings(#[source] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RigError {
    pub(crate) fn invalid_axis(axis: glam::Vec3) -> Self {
        RigError::InvalidAxis {
            x: axis.x,
            y: axis.y,
            z: axis.z,
        }
    }

    /// Returns `true` for errors that come from fixed engine data rather than
    /// from the user or from loaded files.
    #[must_use]
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            RigError::InvalidAxis { .. } | RigError::InvalidLayout(_) | RigError::InvalidCamera(_)
        )
    }
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
