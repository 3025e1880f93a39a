//! World transform propagation.
//!
//! Walks a [`SceneGraph`] depth-first with an explicit stack instead of
//! recursion. Every child of a node is pushed with that node's world matrix,
//! so siblings share their parent's world transform and never inherit from
//! one another.

use glam::Affine3A;
use slotmap::SecondaryMap;

use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;
use crate::scene::node::SceneNode;

/// Lazy pre-order traversal of a scene graph.
///
/// Yields `(handle, node, world_transform)` where
/// `world_transform = parent_world * node.local_transform()`.
pub struct Traversal<'a> {
    graph: &'a SceneGraph,
    // (node, parent world matrix)
    stack: Vec<(NodeHandle, Affine3A)>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(graph: &'a SceneGraph, start: NodeHandle, parent_world: Affine3A) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push((start, parent_world));
        Self { graph, stack }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (NodeHandle, &'a SceneNode, Affine3A);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, parent_world) = self.stack.pop()?;
            let Some(node) = self.graph.nodes().get(handle) else {
                continue;
            };

            let world = parent_world * node.local;

            // Reverse push keeps children in order.
            for &child in node.children.iter().rev() {
                self.stack.push((child, world));
            }

            return Some((handle, node, world));
        }
    }
}

/// Computes every node's world transform in one pass.
#[must_use]
pub fn world_matrices(graph: &SceneGraph) -> SecondaryMap<NodeHandle, Affine3A> {
    let mut out = SecondaryMap::with_capacity(graph.len());
    for (handle, _, world) in graph.traverse() {
        out.insert(handle, world);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::pose::{Joint, PoseState};
    use crate::scene::node::NodeKind;
    use crate::scene::skeleton::SkeletonLayout;

    #[test]
    fn test_preorder_visits_each_limb_chain_before_the_next() {
        let layout = SkeletonLayout::with_limb_count(2);
        let graph = SceneGraph::build(&layout, &PoseState::new(2), 0.0).unwrap();

        let kinds: Vec<NodeKind> = graph.traverse().map(|(_, node, _)| node.kind()).collect();
        let seg = |limb, joint| NodeKind::Segment { limb, joint };
        assert_eq!(
            kinds,
            vec![
                NodeKind::Body,
                seg(0, Joint::Base),
                seg(0, Joint::Mid),
                seg(0, Joint::Tip),
                seg(1, Joint::Base),
                seg(1, Joint::Mid),
                seg(1, Joint::Tip),
            ]
        );
    }

    #[test]
    fn test_traversal_matches_ancestor_composition() {
        let layout = SkeletonLayout::with_limb_count(3);
        let mut pose = PoseState::new(3);
        pose.set_angle(2, Joint::Mid, 40.0).unwrap();
        let graph = SceneGraph::build(&layout, &pose, 15.0).unwrap();

        let worlds = world_matrices(&graph);
        for (handle, _, _) in graph.traverse() {
            let composed = graph.world_transform(handle).unwrap();
            assert!(composed.abs_diff_eq(worlds[handle], 1e-5));
        }
    }
}
