//! Joint angles and the whole-rig pose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RigError, Result};

/// One of the three joints along a limb, proximal to distal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Base,
    Mid,
    Tip,
}

impl Joint {
    /// All joints in chain order.
    pub const ALL: [Joint; 3] = [Joint::Base, Joint::Mid, Joint::Tip];

    /// Position of the joint in the chain (`Base` = 0).
    #[inline]
    #[must_use]
    pub fn depth(self) -> usize {
        match self {
            Joint::Base => 0,
            Joint::Mid => 1,
            Joint::Tip => 2,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Joint::Base => "base",
            Joint::Mid => "mid",
            Joint::Tip => "tip",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "base" => Ok(Joint::Base),
            "mid" => Ok(Joint::Mid),
            "tip" => Ok(Joint::Tip),
            other => Err(RigError::UnknownJoint(other.to_string())),
        }
    }
}

/// Bend angles of one limb, in degrees.
///
/// Values are unconstrained: any finite number is a valid angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub base: f32,
    pub mid: f32,
    pub tip: f32,
}

impl JointAngles {
    #[must_use]
    pub const fn new(base: f32, mid: f32, tip: f32) -> Self {
        Self { base, mid, tip }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, joint: Joint) -> f32 {
        match joint {
            Joint::Base => self.base,
            Joint::Mid => self.mid,
            Joint::Tip => self.tip,
        }
    }

    #[inline]
    pub fn set(&mut self, joint: Joint, degrees: f32) {
        match joint {
            Joint::Base => self.base = degrees,
            Joint::Mid => self.mid = degrees,
            Joint::Tip => self.tip = degrees,
        }
    }
}

/// The current joint angles of every limb.
///
/// The limb count is fixed when the pose is created. Poses are plain values:
/// cloning one gives an independent snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseState {
    limbs: Vec<JointAngles>,
}

impl PoseState {
    /// A rest pose (all angles zero) with `limb_count` limbs.
    #[must_use]
    pub fn new(limb_count: usize) -> Self {
        Self {
            limbs: vec![JointAngles::default(); limb_count],
        }
    }

    #[must_use]
    pub fn from_limbs(limbs: Vec<JointAngles>) -> Self {
        Self { limbs }
    }

    #[inline]
    #[must_use]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    #[inline]
    #[must_use]
    pub fn limbs(&self) -> &[JointAngles] {
        &self.limbs
    }

    #[must_use]
    pub fn limb(&self, index: usize) -> Option<&JointAngles> {
        self.limbs.get(index)
    }

    pub fn limb_mut(&mut self, index: usize) -> Result<&mut JointAngles> {
        let count = self.limbs.len();
        self.limbs
            .get_mut(index)
            .ok_or(RigError::LimbOutOfRange { index, count })
    }

    pub fn angle(&self, index: usize, joint: Joint) -> Result<f32> {
        self.limbs
            .get(index)
            .map(|limb| limb.get(joint))
            .ok_or(RigError::LimbOutOfRange {
                index,
                count: self.limbs.len(),
            })
    }

    pub fn set_angle(&mut self, index: usize, joint: Joint, degrees: f32) -> Result<()> {
        self.limb_mut(index)?.set(joint, degrees);
        Ok(())
    }

    /// Overwrites every limb from `other`, keeping this pose's limb count.
    ///
    /// Poses of a different length are rejected with [`RigError::LimbOutOfRange`].
    pub fn copy_from(&mut self, other: &PoseState) -> Result<()> {
        if other.limbs.len() != self.limbs.len() {
            return Err(RigError::LimbOutOfRange {
                index: other.limbs.len().saturating_sub(1),
                count: self.limbs.len(),
            });
        }
        self.limbs.copy_from_slice(&other.limbs);
        Ok(())
    }
}
