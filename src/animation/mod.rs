//! Pose data and keyframe animation.
//!
//! - [`PoseState`]: joint angles of every limb
//! - [`KeyframeStore`]: recorded timeline plus its saved format
//! - [`AnimationPlayer`] / [`evaluate`]: looping, uniformly spaced playback

pub mod codec;
pub mod keyframe;
pub mod player;
pub mod pose;
pub mod values;

pub use keyframe::{Keyframe, KeyframeStore};
pub use player::{AnimationPlayer, PlaybackState, TimelinePosition, evaluate};
pub use pose::{Joint, JointAngles, PoseState};
pub use values::Interpolatable;
