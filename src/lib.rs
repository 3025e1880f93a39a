#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Pose and keyframe engine for articulated, puppet-like rigs.
//!
//! A body carries a ring of limbs, each a chain of three jointed segments.
//! The [`Engine`] keeps the current joint angles, rebuilds a [`SceneGraph`]
//! whenever they change, and hands every segment's world transform to a
//! [`Renderer`]. Poses can be recorded as keyframes, played back in a loop,
//! and saved or loaded as JSON.

pub mod animation;
pub mod app;
pub mod assets;
pub mod engine;
pub mod errors;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{AnimationPlayer, Joint, JointAngles, Keyframe, KeyframeStore, PoseState, evaluate};
pub use app::{InputEvent, InputResponse, TickLoop};
pub use engine::Engine;
pub use errors::{Result, RigError};
pub use renderer::{DrawCall, DrawRecorder, Renderer};
pub use scene::{GeometryHandle, NodeHandle, NodeKind, SceneGraph, SkeletonLayout};
pub use settings::EngineSettings;
