//! Posed scene graph.
//!
//! - [`transform`]: pure affine helpers
//! - [`SkeletonLayout`]: fixed rig dimensions and geometry handles
//! - [`SceneGraph`]: the rig built from a pose, with world-space traversal
//! - [`OrbitCamera`]: view-projection for the renderer

pub mod camera;
pub mod graph;
pub mod node;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use camera::{CameraSettings, OrbitCamera};
pub use graph::SceneGraph;
pub use node::{NodeKind, SceneNode};
pub use skeleton::{Anchor, GeometryHandle, Prism, SegmentDims, SkeletonLayout};
pub use transform_system::Traversal;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
