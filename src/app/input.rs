use crate::animation::pose::Joint;

/// Discrete user actions, applied between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SetJointAngle {
        limb: usize,
        joint: Joint,
        degrees: f32,
    },
    /// Yaw of the whole body about the vertical axis, in degrees.
    SetBodyOrientation(f32),
    /// Orbit angle of the camera, in degrees.
    SetCameraAngle(f32),
    SetAspectRatio(f32),
    SetPlaybackSpeed(f64),
    RecordKeyframe,
    Play,
    Stop,
    SaveAnimation,
    LoadAnimation(Vec<u8>),
}

/// What an accepted input produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InputResponse {
    Applied,
    Recorded { count: usize },
    Playing,
    Stopped,
    Saved(Vec<u8>),
    Loaded { count: usize },
}
