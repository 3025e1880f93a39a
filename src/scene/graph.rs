//! Posed scene graph.
//!
//! A [`SceneGraph`] is a snapshot: it is built in one pass from a pose and a
//! skeleton layout, and never edited afterwards. When the pose changes the
//! whole graph is rebuilt, so handles from an old graph must not be used
//! with a new one.

use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::animation::pose::{Joint, PoseState};
use crate::errors::{RigError, Result};
use crate::scene::NodeHandle;
use crate::scene::node::{NodeKind, SceneNode};
use crate::scene::skeleton::{GeometryHandle, SkeletonLayout};
use crate::scene::transform::{
    degrees_to_radians, identity, normalized_axis, rotate_around_axis, translate,
};
use crate::scene::transform_system::Traversal;

#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeHandle, SceneNode>,
    root: NodeHandle,
    /// `limbs[i][joint.depth()]` is the node of that segment.
    limbs: Vec<[NodeHandle; 3]>,
}

impl SceneGraph {
    /// Builds the posed rig.
    ///
    /// - Body: `translate(0, -body_size / 2, 0) · rotate(Y, body_yaw)`
    /// - Base segment: `translate(attachment) · rotate(bend_axis, base)`
    /// - Mid / tip: `translate(0, -previous_length, 0) · rotate(bend_axis, angle)`
    ///
    /// A joint's rotation therefore carries every segment distal to it.
    pub fn build(layout: &SkeletonLayout, pose: &PoseState, body_yaw_degrees: f32) -> Result<Self> {
        if pose.limb_count() != layout.limb_count {
            return Err(RigError::InvalidLayout(format!(
                "pose has {} limbs, layout expects {}",
                pose.limb_count(),
                layout.limb_count
            )));
        }
        let bend_axis = normalized_axis(layout.bend_axis)?;

        let mut nodes: SlotMap<NodeHandle, SceneNode> =
            SlotMap::with_capacity_and_key(1 + 3 * layout.limb_count);

        let body_local = rotate_around_axis(
            &translate(&identity(), Vec3::new(0.0, -layout.body_size / 2.0, 0.0)),
            Vec3::Y,
            degrees_to_radians(body_yaw_degrees),
        )?;
        let root = nodes.insert(SceneNode::new(
            NodeKind::Body,
            GeometryHandle::BODY,
            body_local,
            None,
        ));

        let mut limbs = Vec::with_capacity(layout.limb_count);
        for (limb, angles) in pose.limbs().iter().enumerate() {
            let mut chain = [root; 3];
            let mut parent = root;
            let mut offset = layout.attachment_offset(limb);

            for joint in Joint::ALL {
                let local = rotate_around_axis(
                    &translate(&identity(), offset),
                    bend_axis,
                    degrees_to_radians(angles.get(joint)),
                )?;
                let handle = nodes.insert(SceneNode::new(
                    NodeKind::Segment { limb, joint },
                    GeometryHandle::for_segment(joint),
                    local,
                    Some(parent),
                ));
                nodes[parent].children.push(handle);

                chain[joint.depth()] = handle;
                parent = handle;
                offset = layout.joint_offset(joint);
            }
            limbs.push(chain);
        }

        log::debug!("Built scene graph with {} nodes", nodes.len());
        Ok(Self { nodes, root, limbs })
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    /// Handle of a limb segment.
    #[must_use]
    pub fn segment(&self, limb: usize, joint: Joint) -> Option<NodeHandle> {
        self.limbs.get(limb).map(|chain| chain[joint.depth()])
    }

    /// Handle of the node standing for `kind`.
    #[must_use]
    pub fn find(&self, kind: NodeKind) -> Option<NodeHandle> {
        match kind {
            NodeKind::Body => Some(self.root),
            NodeKind::Segment { limb, joint } => self.segment(limb, joint),
        }
    }

    /// Depth-first, pre-order walk yielding each node with its world transform.
    ///
    /// Each call starts a fresh traversal from the body.
    #[must_use]
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::new(self, self.root, identity())
    }

    /// World transform of one node, composed from its ancestors.
    #[must_use]
    pub fn world_transform(&self, handle: NodeHandle) -> Option<Affine3A> {
        let mut node = self.nodes.get(handle)?;
        let mut world = node.local;
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            world = node.local * world;
        }
        Some(world)
    }

    #[must_use]
    pub fn world_transform_of(&self, kind: NodeKind) -> Option<Affine3A> {
        self.world_transform(self.find(kind)?)
    }

    /// World-space joint position (proximal end) and far end of a segment.
    #[must_use]
    pub fn segment_endpoints(
        &self,
        layout: &SkeletonLayout,
        limb: usize,
        joint: Joint,
    ) -> Option<(Vec3, Vec3)> {
        let world = self.world_transform_of(NodeKind::Segment { limb, joint })?;
        Some((
            world.transform_point3(Vec3::ZERO),
            world.transform_point3(layout.joint_offset(joint)),
        ))
    }

    pub(crate) fn nodes(&self) -> &SlotMap<NodeHandle, SceneNode> {
        &self.nodes
    }
}
