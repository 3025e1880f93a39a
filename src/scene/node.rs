use glam::Affine3A;

use crate::animation::pose::Joint;
use crate::scene::NodeHandle;
use crate::scene::skeleton::GeometryHandle;

/// What rigid part of the creature a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Body,
    Segment { limb: usize, joint: Joint },
}

/// One rigid segment of a posed rig.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child handles:
/// - `parent`: `None` only for the body
/// - `children`: ordered; the body's children are the limb roots, a segment's
///   only child is the next segment of its limb
///
/// Links are set by [`SceneGraph::build`](crate::scene::SceneGraph::build) and
/// cannot be changed afterwards, which keeps the tree acyclic.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) kind: NodeKind,
    pub(crate) geometry: GeometryHandle,
    pub(crate) local: Affine3A,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
}

impl SceneNode {
    pub(crate) fn new(
        kind: NodeKind,
        geometry: GeometryHandle,
        local: Affine3A,
        parent: Option<NodeHandle>,
    ) -> Self {
        Self {
            kind,
            geometry,
            local,
            parent,
            children: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    /// Transform relative to the parent node.
    #[inline]
    #[must_use]
    pub fn local_transform(&self) -> &Affine3A {
        &self.local
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
