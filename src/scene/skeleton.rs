//! Skeleton layout: the fixed structural constants of the rig.
//!
//! The layout describes how many limbs hang off the body, how long and wide
//! each segment is, where limbs attach, and which local axis joints bend
//! about. It is configuration, not pose: nothing here changes while the rig
//! is being animated.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::pose::Joint;
use crate::errors::{RigError, Result};
use crate::scene::transform::normalized_axis;

/// Opaque geometry reference handed to the renderer.
///
/// Handles are stable for a given layout: the body is always
/// [`GeometryHandle::BODY`] and every limb shares one handle per joint depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u32);

impl GeometryHandle {
    pub const BODY: GeometryHandle = GeometryHandle(0);

    #[must_use]
    pub fn for_segment(joint: Joint) -> Self {
        GeometryHandle(1 + joint.depth() as u32)
    }
}

/// Where a prism sits relative to its node origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered on the origin.
    Center,
    /// Top face at the origin, extending along local -Y.
    Top,
}

/// Box dimensions a renderer needs to build the mesh for a geometry handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentDims {
    pub length: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonLayout {
    pub limb_count: usize,
    /// Edge length of the cubic body.
    pub body_size: f32,
    /// Distance of each limb attachment from the body's vertical axis.
    pub attach_radius: f32,
    /// Height of the attachment ring in body space.
    pub attach_height: f32,
    /// Base, mid and tip segment dimensions.
    pub segments: [SegmentDims; 3],
    /// Local axis every joint bends about.
    pub bend_axis: Vec3,
}

impl Default for SkeletonLayout {
    fn default() -> Self {
        Self {
            limb_count: 8,
            body_size: 4.0,
            attach_radius: 2.0,
            attach_height: -2.0,
            segments: [
                SegmentDims { length: 5.0, width: 0.4 },
                SegmentDims { length: 5.0, width: 0.3 },
                SegmentDims { length: 5.0, width: 0.2 },
            ],
            bend_axis: Vec3::Z,
        }
    }
}

impl SkeletonLayout {
    /// Same as the default layout with a different number of limbs.
    #[must_use]
    pub fn with_limb_count(limb_count: usize) -> Self {
        Self {
            limb_count,
            ..Self::default()
        }
    }

    /// Checks every constant the scene builder relies on.
    pub fn validate(&self) -> Result<()> {
        if self.limb_count == 0 {
            return Err(RigError::InvalidLayout("limb_count must be at least 1".into()));
        }
        if !(self.body_size.is_finite() && self.body_size > 0.0) {
            return Err(RigError::InvalidLayout(format!(
                "body_size must be positive, got {}",
                self.body_size
            )));
        }
        if !(self.attach_radius.is_finite() && self.attach_radius >= 0.0)
            || !self.attach_height.is_finite()
        {
            return Err(RigError::InvalidLayout("attachment ring must be finite".into()));
        }
        for (joint, dims) in Joint::ALL.iter().zip(&self.segments) {
            if !(dims.length.is_finite() && dims.length > 0.0)
                || !(dims.width.is_finite() && dims.width > 0.0)
            {
                return Err(RigError::InvalidLayout(format!(
                    "{joint} segment must have positive length and width"
                )));
            }
        }
        normalized_axis(self.bend_axis)?;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn segment(&self, joint: Joint) -> &SegmentDims {
        &self.segments[joint.depth()]
    }

    /// Angle of limb `index` around the body's vertical axis, evenly spread.
    #[must_use]
    pub fn attachment_angle(&self, index: usize) -> f32 {
        TAU * index as f32 / self.limb_count as f32
    }

    /// Limb attachment point in body space.
    #[must_use]
    pub fn attachment_offset(&self, index: usize) -> Vec3 {
        let angle = self.attachment_angle(index);
        Vec3::new(
            self.attach_radius * angle.cos(),
            self.attach_height,
            self.attach_radius * angle.sin(),
        )
    }

    /// Offset from a segment's joint to the joint of the segment after it.
    #[must_use]
    pub fn joint_offset(&self, joint: Joint) -> Vec3 {
        Vec3::new(0.0, -self.segment(joint).length, 0.0)
    }

    /// Shape behind a geometry handle, if the handle belongs to this layout.
    #[must_use]
    pub fn shape(&self, handle: GeometryHandle) -> Option<Prism> {
        if handle == GeometryHandle::BODY {
            return Some(Prism {
                width: self.body_size,
                height: self.body_size,
                depth: self.body_size,
                anchor: Anchor::Center,
            });
        }
        let joint = *Joint::ALL.get(handle.0.checked_sub(1)? as usize)?;
        let dims = self.segment(joint);
        Some(Prism {
            width: dims.width,
            height: dims.length,
            depth: dims.width,
            anchor: Anchor::Top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(SkeletonLayout::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_axis() {
        let layout = SkeletonLayout {
            bend_axis: Vec3::ZERO,
            ..SkeletonLayout::default()
        };
        assert!(matches!(layout.validate(), Err(RigError::InvalidAxis { .. })));
    }

    #[test]
    fn test_attachment_ring_is_even() {
        let layout = SkeletonLayout::with_limb_count(4);
        let p1 = layout.attachment_offset(1);
        assert!(p1.x.abs() < 1e-5);
        assert!((p1.z - 2.0).abs() < 1e-5);
        assert_eq!(p1.y, -2.0);
    }

    #[test]
    fn test_shapes() {
        let layout = SkeletonLayout::default();
        let tip = layout.shape(GeometryHandle::for_segment(Joint::Tip)).unwrap();
        assert_eq!(tip.width, 0.2);
        assert_eq!(tip.anchor, Anchor::Top);
        assert!(layout.shape(GeometryHandle(9)).is_none());
    }
}
